//! Gold Reporter — a one-shot job that resolves a gold quote, collects a handful of
//! market headlines and forwards both to a notification relay as JSON.
//!
//! A run is strictly sequential:
//! 1. configuration is validated (`WORKER_URL`, `SECRET_KEY`) before any request,
//! 2. price sources are tried in priority order until one answers,
//! 3. news feeds are scanned one by one; failures only shrink the headline list,
//! 4. the payload is built and posted once to the relay.
//!
//! Scheduling is left to the caller (cron, CI schedule, ...).
//!
//! Usage example (CLI):
//! ```bash
//! WORKER_URL=https://relay.example/hook SECRET_KEY=... gold_reporter --sources yahoo,coingecko,binance
//! ```
//!
//! Exit status is non-zero when configuration is missing, every price source fails,
//! or the relay rejects the payload (unless `--lenient` is given).
#![warn(missing_docs)]
mod args;
mod config;
mod http;
mod news;
mod relay;
mod resolver;
mod sources;

use crate::args::Args;
use crate::config::Config;
use crate::http::{HttpTransport, ReqwestTransport};
use crate::news::NewsAggregator;
use crate::relay::{DeliveryOutcome, RelayClient};
use crate::resolver::PriceResolver;
use crate::sources::build_sources;
use chrono::{DateTime, Utc};
use clap::Parser;
use gold_common::OutboundPayload;
use gold_common::ReporterError;
use gold_common::Result;
use log::{error, info, warn};

/// Executes one reporting run against `http`, stamping the payload with `now`.
///
/// No request is issued before the relay settings are validated, and the relay is
/// only called once a quote has been resolved.
fn run(config: &Config, http: &dyn HttpTransport, now: DateTime<Utc>) -> Result<DeliveryOutcome> {
    let relay = RelayClient::new(
        &config.relay.endpoint_url,
        &config.relay.shared_secret,
        config.relay.timeout,
    )?;

    let sources = build_sources(&config.price.sources, config.price.timeout);
    let quote = PriceResolver::new(&sources).resolve(http)?;

    let news = NewsAggregator::new(
        config.news.feeds.clone(),
        config.news.timeout,
        config.news.per_feed_cap,
        config.news.total_cap,
        config.news.min_len,
    )
    .aggregate(http);

    let payload = OutboundPayload::build(quote, news, now);
    let outcome = relay.send(http, &payload)?;

    if config.relay.strict {
        outcome.clone().into_result()?;
    } else if !outcome.is_delivered() {
        warn!("Relay delivery failed; continuing in lenient mode");
    }
    Ok(outcome)
}

fn main() -> Result<(), ReporterError> {
    init_logger();
    load_dotenv();
    let args = Args::parse();

    let config = Config::from_env(&args).inspect_err(|e| error!("{}", e))?;
    info!(
        "Sources: {:?}, feeds: {}, strict: {}",
        config.price.sources,
        config.news.feeds.len(),
        config.relay.strict
    );

    let transport = ReqwestTransport::new()?;
    match run(&config, &transport, Utc::now()) {
        Ok(outcome) => {
            info!("Run finished: {:?}", outcome);
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e)
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Load a `.env` file from the working directory when present.
fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {}", e);
        }
    }
}
