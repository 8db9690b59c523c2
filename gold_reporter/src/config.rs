//! Run configuration.
//!
//! Built once in `main` from the parsed [`Args`] and the two required environment
//! values, then passed by reference to every component. Missing values are
//! reported before any network activity.
use std::fmt;
use std::time::Duration;

use gold_common::{ReporterError, Result, SourceKind};

use crate::args::Args;
use crate::news::FeedSpec;

/// Relay endpoint URL.
pub const WORKER_URL_VAR: &str = "WORKER_URL";
/// Shared secret sent in the relay header.
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

#[derive(Clone)]
pub struct RelaySettings {
    pub endpoint_url: String,
    pub shared_secret: String,
    pub timeout: Duration,
    /// Exit non-zero when the relay does not accept the payload.
    pub strict: bool,
}

impl fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelaySettings")
            .field("endpoint_url", &self.endpoint_url)
            .field("shared_secret", &"***")
            .field("timeout", &self.timeout)
            .field("strict", &self.strict)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct PriceSettings {
    pub sources: Vec<SourceKind>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct NewsSettings {
    pub feeds: Vec<FeedSpec>,
    pub timeout: Duration,
    pub per_feed_cap: usize,
    pub total_cap: usize,
    pub min_len: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub relay: RelaySettings,
    pub price: PriceSettings,
    pub news: NewsSettings,
}

impl Config {
    /// Reads the required values from the process environment.
    pub fn from_env(args: &Args) -> Result<Self> {
        Self::from_args(args, |key| std::env::var(key).ok())
    }

    /// Builds the configuration with an explicit variable lookup.
    pub fn from_args(args: &Args, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint_url = required(&lookup, WORKER_URL_VAR)?;
        let shared_secret = required(&lookup, SECRET_KEY_VAR)?;

        let feeds = if args.feeds.is_empty() {
            FeedSpec::defaults()
        } else {
            args.feeds.clone()
        };

        Ok(Config {
            relay: RelaySettings {
                endpoint_url,
                shared_secret,
                timeout: seconds("relay-timeout", args.relay_timeout)?,
                strict: !args.lenient,
            },
            price: PriceSettings {
                sources: args.sources.clone(),
                timeout: seconds("price-timeout", args.price_timeout)?,
            },
            news: NewsSettings {
                feeds,
                timeout: seconds("news-timeout", args.news_timeout)?,
                per_feed_cap: args.per_feed_cap,
                total_cap: args.total_cap,
                min_len: args.min_headline_len,
            },
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ReporterError::ConfigurationMissing(key.to_string())),
    }
}

fn seconds(name: &str, secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(ReporterError::InvalidArgument(format!(
            "{name} must be at least 1 second"
        )));
    }
    Ok(Duration::from_secs(secs))
}
