//! Command-line arguments for the Gold Reporter.
//!
//! This module defines the CLI interface using `clap`. Every tunable also reads an
//! environment variable so the reporter can be driven entirely from a scheduler's
//! environment. The relay URL and secret are not arguments; see `config`.
use clap::Parser;
use gold_common::SourceKind;
use gold_common::net::{NEWS_TIMEOUT, PRICE_TIMEOUT, RELAY_TIMEOUT};

use crate::news::{DEFAULT_MIN_LEN, DEFAULT_PER_FEED_CAP, DEFAULT_TOTAL_CAP, FeedSpec};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Price sources to try, in priority order.
    #[clap(
        long,
        env = "GOLD_SOURCES",
        value_delimiter = ',',
        default_values_t = SourceKind::DEFAULT_ORDER.to_vec()
    )]
    pub sources: Vec<SourceKind>,

    /// News feed as `url` or `url|excluded substring`. Repeatable; replaces the
    /// built-in feed list when given. `GOLD_FEEDS` takes one feed per line.
    #[clap(long = "feed", env = "GOLD_FEEDS", value_delimiter = '\n')]
    pub feeds: Vec<FeedSpec>,

    /// Timeout in seconds for each price source request.
    #[clap(long, env = "GOLD_PRICE_TIMEOUT", default_value_t = PRICE_TIMEOUT.as_secs())]
    pub price_timeout: u64,

    /// Timeout in seconds for each news feed request.
    #[clap(long, env = "GOLD_NEWS_TIMEOUT", default_value_t = NEWS_TIMEOUT.as_secs())]
    pub news_timeout: u64,

    /// Timeout in seconds for the relay request.
    #[clap(long, env = "GOLD_RELAY_TIMEOUT", default_value_t = RELAY_TIMEOUT.as_secs())]
    pub relay_timeout: u64,

    /// Maximum headlines taken from a single feed.
    #[clap(long, env = "GOLD_PER_FEED_CAP", default_value_t = DEFAULT_PER_FEED_CAP)]
    pub per_feed_cap: usize,

    /// Maximum headlines sent to the relay.
    #[clap(long, env = "GOLD_TOTAL_CAP", default_value_t = DEFAULT_TOTAL_CAP)]
    pub total_cap: usize,

    /// Headlines with this many characters or fewer are dropped.
    #[clap(long, env = "GOLD_MIN_HEADLINE_LEN", default_value_t = DEFAULT_MIN_LEN)]
    pub min_headline_len: usize,

    /// Log relay failures instead of exiting with an error.
    #[clap(long, env = "GOLD_LENIENT")]
    pub lenient: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_primary_then_secondary() {
        let args = Args::try_parse_from(["gold_reporter"]).unwrap();
        assert_eq!(args.sources, vec![SourceKind::Yahoo, SourceKind::CoinGecko]);
        assert!(args.feeds.is_empty());
        assert_eq!(args.per_feed_cap, 3);
        assert_eq!(args.total_cap, 8);
        assert!(!args.lenient);
    }

    #[test]
    fn parses_sources_and_feeds() {
        let args = Args::try_parse_from([
            "gold_reporter",
            "--sources",
            "binance,yahoo",
            "--feed",
            "https://a.example/rss|Alpha",
            "--feed",
            "https://b.example/rss",
            "--lenient",
        ])
        .unwrap();
        assert_eq!(args.sources, vec![SourceKind::Binance, SourceKind::Yahoo]);
        assert_eq!(
            args.feeds,
            vec![
                FeedSpec::new("https://a.example/rss", Some("Alpha")),
                FeedSpec::new("https://b.example/rss", None),
            ]
        );
        assert!(args.lenient);
    }

    #[test]
    fn feed_urls_may_contain_commas() {
        let args = Args::try_parse_from([
            "gold_reporter",
            "--feed",
            "https://x.example/rss?q=gold,silver|Example, Inc",
        ])
        .unwrap();
        assert_eq!(
            args.feeds,
            vec![FeedSpec::new("https://x.example/rss?q=gold,silver", Some("Example, Inc"))]
        );
    }

    #[test]
    fn feed_list_splits_on_newlines() {
        let args = Args::try_parse_from([
            "gold_reporter",
            "--feed",
            "https://a.example/rss?q=gold,silver|Alpha\nhttps://b.example/rss",
        ])
        .unwrap();
        assert_eq!(
            args.feeds,
            vec![
                FeedSpec::new("https://a.example/rss?q=gold,silver", Some("Alpha")),
                FeedSpec::new("https://b.example/rss", None),
            ]
        );
    }

    #[test]
    fn rejects_unknown_source() {
        assert!(Args::try_parse_from(["gold_reporter", "--sources", "kitco"]).is_err());
    }
}
