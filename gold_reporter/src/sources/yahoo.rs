//! Yahoo Finance chart endpoint for COMEX gold futures (`GC=F`).
//!
//! The quote lives under `chart.result[0].meta`. Yahoo does not publish a change
//! percentage there, so it is derived from `previousClose` (or `chartPreviousClose`
//! when the former is absent).
use std::time::Duration;

use gold_common::market::change_percent;
use gold_common::{MarketQuote, PriceLevel, ReporterError, Result, SourceKind};
use serde::Deserialize;

use super::{PriceSource, decode, get_body, valid_price};
use crate::http::HttpTransport;

pub const YAHOO_URL: &str =
    "https://query1.finance.yahoo.com/v8/finance/chart/GC=F?interval=1d&range=1d";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_day_high: Option<f64>,
    regular_market_day_low: Option<f64>,
}

pub struct YahooSource {
    url: String,
    timeout: Duration,
}

impl YahooSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            url: YAHOO_URL.to_string(),
            timeout,
        }
    }
}

/// Map a chart response body into a quote.
pub fn parse(body: &str) -> Result<MarketQuote> {
    let kind = SourceKind::Yahoo;
    let response: ChartResponse = decode(kind, body)?;
    let meta = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .map(|r| r.meta)
        .ok_or_else(|| ReporterError::unavailable(kind.label(), "empty chart result"))?;

    let price = valid_price(kind, meta.regular_market_price)?;
    let previous_close = meta.previous_close.or(meta.chart_previous_close);

    Ok(MarketQuote::new(
        price,
        change_percent(price, previous_close),
        PriceLevel::from_option(meta.regular_market_day_high),
        PriceLevel::from_option(meta.regular_market_day_low),
        kind.label(),
    ))
}

impl PriceSource for YahooSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Yahoo
    }

    fn fetch(&self, http: &dyn HttpTransport) -> Result<MarketQuote> {
        let body = get_body(http, self.kind(), &self.url, self.timeout)?;
        parse(&body)
    }
}
