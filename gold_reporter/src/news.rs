//! Headline aggregation from RSS-like feeds.
//!
//! Feeds are fetched one after another. Titles are pulled out of the raw body with a
//! regular expression instead of an XML parser, which keeps slightly broken feeds
//! usable. Each candidate is cleaned, filtered by length and by the feed's excluded
//! substring, capped per feed, then the merged list is deduplicated and capped.
//!
//! A failing feed is logged and skipped; if every feed fails the result is simply
//! empty.
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use gold_common::{ReporterError, Result};
use log::{debug, info, warn};
use regex::Regex;

use crate::http::HttpTransport;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title(?:\s[^>]*)?>(.*?)</title\s*>").expect("valid title regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]{1,6})|#([0-9]{1,7})|(lt|gt|quot|apos|amp|nbsp));")
        .expect("valid entity regex")
});

/// Candidates with this many characters or fewer are dropped.
pub const DEFAULT_MIN_LEN: usize = 15;
pub const DEFAULT_PER_FEED_CAP: usize = 3;
pub const DEFAULT_TOTAL_CAP: usize = 8;

/// Feeds used when none are given on the command line.
pub const DEFAULT_FEEDS: [(&str, &str); 5] = [
    (
        "https://news.google.com/rss/search?q=gold+price+when:1d&hl=en-US&gl=US&ceid=US:en",
        "Google News",
    ),
    ("https://www.kitco.com/rss/KitcoNews.xml", "Kitco News"),
    ("https://www.fxstreet.com/rss/news", "FXStreet"),
    ("https://www.investing.com/rss/news_11.rss", "Investing.com"),
    ("https://www.mining.com/feed/", "MINING.COM"),
];

/// One feed and the substring that marks its self-referential titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSpec {
    pub url: String,
    pub exclude: Option<String>,
}

impl FeedSpec {
    pub fn new(url: impl Into<String>, exclude: Option<&str>) -> Self {
        Self {
            url: url.into(),
            exclude: exclude.map(str::to_string),
        }
    }

    pub fn defaults() -> Vec<FeedSpec> {
        DEFAULT_FEEDS
            .iter()
            .map(|(url, exclude)| FeedSpec::new(*url, Some(exclude)))
            .collect()
    }

    fn allows(&self, headline: &str) -> bool {
        match &self.exclude {
            Some(excluded) => !headline.contains(excluded.as_str()),
            None => true,
        }
    }
}

/// Parses `url` or `url|excluded substring`.
impl FromStr for FeedSpec {
    type Err = ReporterError;

    fn from_str(s: &str) -> Result<Self> {
        let (url, exclude) = match s.split_once('|') {
            Some((url, exclude)) => (url.trim(), Some(exclude.trim()).filter(|e| !e.is_empty())),
            None => (s.trim(), None),
        };
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ReporterError::InvalidArgument(format!(
                "feed must be an http(s) URL: {s:?}"
            )));
        }
        Ok(FeedSpec::new(url, exclude))
    }
}

impl fmt::Display for FeedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exclude {
            Some(exclude) => write!(f, "{}|{}", self.url, exclude),
            None => write!(f, "{}", self.url),
        }
    }
}

/// Raw title texts in document order.
pub fn extract_titles(body: &str) -> Vec<&str> {
    TITLE_RE
        .captures_iter(body)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Decode named and numeric character references in one pass, so `&amp;lt;`
/// stays the literal text `&lt;`. Unknown or invalid references are kept as is.
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures| {
            let decoded = if let Some(hex) = caps.get(1) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = caps.get(2) {
                dec.as_str().parse().ok().and_then(char::from_u32)
            } else {
                match caps.get(3).map(|m| m.as_str()) {
                    Some("lt") => Some('<'),
                    Some("gt") => Some('>'),
                    Some("quot") => Some('"'),
                    Some("apos") => Some('\''),
                    Some("amp") => Some('&'),
                    Some("nbsp") => Some(' '),
                    _ => None,
                }
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Strip CDATA markers, decode entities, then strip markup (including markup the
/// feed sent entity-encoded) and normalize whitespace.
pub fn clean_title(raw: &str) -> String {
    let text = raw.replace("<![CDATA[", "").replace("]]>", "");
    let text = decode_entities(&text);
    let text = TAG_RE.replace_all(&text, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub struct NewsAggregator {
    feeds: Vec<FeedSpec>,
    timeout: Duration,
    per_feed_cap: usize,
    total_cap: usize,
    min_len: usize,
}

impl NewsAggregator {
    pub fn new(
        feeds: Vec<FeedSpec>,
        timeout: Duration,
        per_feed_cap: usize,
        total_cap: usize,
        min_len: usize,
    ) -> Self {
        Self {
            feeds,
            timeout,
            per_feed_cap,
            total_cap,
            min_len,
        }
    }

    /// Headlines a single feed body contributes, at most `per_feed_cap`.
    pub fn headlines_from(&self, feed: &FeedSpec, body: &str) -> Vec<String> {
        extract_titles(body)
            .into_iter()
            .map(clean_title)
            .filter(|h| h.chars().count() > self.min_len)
            .filter(|h| feed.allows(h))
            .take(self.per_feed_cap)
            .collect()
    }

    fn fetch_feed(&self, http: &dyn HttpTransport, feed: &FeedSpec) -> Result<Vec<String>> {
        let response = http
            .get(&feed.url, self.timeout)
            .map_err(|e| ReporterError::unavailable(&feed.url, e.to_string()))?;
        if !response.is_success() {
            return Err(ReporterError::unavailable(
                &feed.url,
                format!("HTTP {}", response.status),
            ));
        }
        Ok(self.headlines_from(feed, &response.body))
    }

    /// Never fails; unreachable feeds only shrink the result.
    pub fn aggregate(&self, http: &dyn HttpTransport) -> Vec<String> {
        let mut collected = Vec::new();
        for feed in &self.feeds {
            match self.fetch_feed(http, feed) {
                Ok(headlines) => {
                    debug!("{} headline(s) from {}", headlines.len(), feed.url);
                    collected.extend(headlines);
                }
                Err(e) => warn!("Skipping feed: {}", e),
            }
        }

        let mut seen = HashSet::new();
        collected.retain(|h| seen.insert(h.clone()));
        collected.truncate(self.total_cap);
        info!("News collected: {} headline(s)", collected.len());
        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::fake::FakeTransport;

    const FEED_A: &str = "https://a.example/rss";
    const FEED_B: &str = "https://b.example/rss";

    fn rss(channel: &str, titles: &[&str]) -> String {
        let items: String = titles
            .iter()
            .map(|t| format!("<item><title>{t}</title><link>https://x</link></item>"))
            .collect();
        format!("<?xml version=\"1.0\"?><rss><channel><title>{channel}</title>{items}</channel></rss>")
    }

    fn aggregator(feeds: Vec<FeedSpec>, per_feed_cap: usize, total_cap: usize) -> NewsAggregator {
        NewsAggregator::new(feeds, Duration::from_secs(1), per_feed_cap, total_cap, DEFAULT_MIN_LEN)
    }

    #[test]
    fn cleans_cdata_markup_and_entities() {
        assert_eq!(
            clean_title("<![CDATA[  Gold &amp; silver <b>rally</b>\n as dollar slips ]]>"),
            "Gold & silver rally as dollar slips"
        );
        assert_eq!(clean_title("Fed&#39;s &quot;pause&quot;"), "Fed's \"pause\"");
    }

    #[test]
    fn strips_markup_sent_entity_encoded() {
        assert_eq!(
            clean_title("&lt;b&gt;Gold&lt;/b&gt; rallies past record high"),
            "Gold rallies past record high"
        );
    }

    #[test]
    fn decodes_numeric_character_references() {
        assert_eq!(
            clean_title("Barrick&#8217;s gold output rises &#038; beats"),
            "Barrick\u{2019}s gold output rises & beats"
        );
        assert_eq!(decode_entities("&#x2014;&#X41;"), "\u{2014}A");
    }

    #[test]
    fn keeps_double_encoded_and_invalid_references_literal() {
        assert_eq!(decode_entities("AT&amp;amp;T"), "AT&amp;T");
        assert_eq!(decode_entities("&#xD800; &bogus; a & b"), "&#xD800; &bogus; a & b");
    }

    #[test]
    fn extracts_titles_from_malformed_xml() {
        let body = "<rss><item><title type=\"text\">First gold headline here</title>\
                    <item><TITLE>Second gold headline here</TITLE><unclosed>";
        assert_eq!(
            extract_titles(body),
            vec!["First gold headline here", "Second gold headline here"]
        );
    }

    #[test]
    fn filters_short_and_excluded_titles() {
        let feed = FeedSpec::new(FEED_A, Some("Kitco"));
        let body = rss(
            "Kitco News",
            &[
                "Gold up today",               // 13 chars
                "Exactly fifteen",             // 15 chars, at the threshold
                "Kitco gold survey turns bullish",
                "Central banks keep buying gold",
            ],
        );
        let headlines = aggregator(vec![], 10, 10).headlines_from(&feed, &body);
        assert_eq!(headlines, vec!["Central banks keep buying gold"]);
    }

    #[test]
    fn caps_each_feed_in_document_order() {
        let feed = FeedSpec::new(FEED_A, None);
        let body = rss(
            "Channel title long enough",
            &[
                "Gold headline number one",
                "Gold headline number two",
                "Gold headline number three",
            ],
        );
        let headlines = aggregator(vec![], 2, 10).headlines_from(&feed, &body);
        assert_eq!(
            headlines,
            vec!["Channel title long enough", "Gold headline number one"]
        );
    }

    #[test]
    fn deduplicates_across_feeds() {
        let http = FakeTransport::new()
            .respond(FEED_A, 200, &rss("Feed A", &["Gold hits new high today", "Silver follows gold higher"]))
            .respond(FEED_B, 200, &rss("Feed B", &["Gold hits new high today"]));
        let feeds = vec![FeedSpec::new(FEED_A, None), FeedSpec::new(FEED_B, None)];
        let headlines = aggregator(feeds, 3, 10).aggregate(&http);

        let hits = headlines
            .iter()
            .filter(|h| h.as_str() == "Gold hits new high today")
            .count();
        assert_eq!(hits, 1);
        assert_eq!(headlines.len(), 2);
    }

    #[test]
    fn total_cap_bounds_output() {
        let titles_a = ["Gold headline alpha one", "Gold headline alpha two", "Gold headline alpha three"];
        let titles_b = ["Gold headline beta one", "Gold headline beta two", "Gold headline beta three"];
        let http = FakeTransport::new()
            .respond(FEED_A, 200, &rss("A", &titles_a))
            .respond(FEED_B, 200, &rss("B", &titles_b));
        let feeds = vec![FeedSpec::new(FEED_A, None), FeedSpec::new(FEED_B, None)];

        for total_cap in 0..8 {
            let headlines = aggregator(feeds.clone(), 2, total_cap).aggregate(&http);
            assert!(headlines.len() <= total_cap);
            let from_a = headlines.iter().filter(|h| h.contains("alpha")).count();
            let from_b = headlines.iter().filter(|h| h.contains("beta")).count();
            assert!(from_a <= 2 && from_b <= 2);
        }
    }

    #[test]
    fn failing_feeds_are_skipped() {
        let http = FakeTransport::new()
            .fail(FEED_A, "connection reset")
            .respond(FEED_B, 200, &rss("B", &["Gold steadies ahead of payrolls"]));
        let feeds = vec![
            FeedSpec::new(FEED_A, None),
            FeedSpec::new("https://c.example/rss", None),
            FeedSpec::new(FEED_B, None),
        ];
        let headlines = aggregator(feeds, 3, 10).aggregate(&http);
        assert_eq!(headlines, vec!["Gold steadies ahead of payrolls"]);
        assert_eq!(http.call_count(), 3);
    }

    #[test]
    fn all_feeds_timing_out_yields_empty() {
        let http = FakeTransport::new();
        let headlines = aggregator(FeedSpec::defaults(), 3, 8).aggregate(&http);
        assert!(headlines.is_empty());
        assert_eq!(http.call_count(), 5);
    }

    #[test]
    fn non_success_status_skips_feed() {
        let http = FakeTransport::new().respond(FEED_A, 404, &rss("A", &["Gold headline never seen"]));
        let headlines = aggregator(vec![FeedSpec::new(FEED_A, None)], 3, 8).aggregate(&http);
        assert!(headlines.is_empty());
    }

    #[test]
    fn parses_feed_arguments() {
        let spec: FeedSpec = "https://x.example/rss | Example Daily".parse().unwrap();
        assert_eq!(spec, FeedSpec::new("https://x.example/rss", Some("Example Daily")));
        assert_eq!(spec.to_string(), "https://x.example/rss|Example Daily");

        let bare: FeedSpec = "https://x.example/rss|".parse().unwrap();
        assert_eq!(bare.exclude, None);

        assert!("ftp://x.example/rss".parse::<FeedSpec>().is_err());
    }
}
