//! Price source adapters.
//!
//! Each adapter issues one bounded request to its vendor and maps the vendor's JSON
//! shape into a [`MarketQuote`]. Any failure (transport error, non-2xx status,
//! missing or malformed fields) comes back as [`ReporterError::SourceUnavailable`];
//! adapters never retry and never abort the run on their own.
//!
//! - `yahoo` — nested chart/meta response, change derived from the previous close.
//! - `coingecko` — flat currency-keyed response without day high/low.
//! - `binance` — 24h ticker with string-encoded numbers.
pub mod binance;
pub mod coingecko;
pub mod yahoo;

use std::time::Duration;

use gold_common::{MarketQuote, ReporterError, Result, SourceKind};
use log::debug;

use crate::http::HttpTransport;

/// One quote provider in the fallback chain.
pub trait PriceSource {
    fn kind(&self) -> SourceKind;

    /// Fetch and normalize a quote. `Err` always means "try the next source".
    fn fetch(&self, http: &dyn HttpTransport) -> Result<MarketQuote>;
}

/// Instantiate the adapters for `kinds`, preserving their priority order.
pub fn build_sources(kinds: &[SourceKind], timeout: Duration) -> Vec<Box<dyn PriceSource>> {
    kinds
        .iter()
        .map(|kind| -> Box<dyn PriceSource> {
            match kind {
                SourceKind::Yahoo => Box::new(yahoo::YahooSource::new(timeout)),
                SourceKind::CoinGecko => Box::new(coingecko::CoinGeckoSource::new(timeout)),
                SourceKind::Binance => Box::new(binance::BinanceSource::new(timeout)),
            }
        })
        .collect()
}

/// GET `url` and return the body of a 2xx answer, mapping everything else to
/// `SourceUnavailable` for `kind`.
pub(crate) fn get_body(
    http: &dyn HttpTransport,
    kind: SourceKind,
    url: &str,
    timeout: Duration,
) -> Result<String> {
    let response = http
        .get(url, timeout)
        .map_err(|e| ReporterError::unavailable(kind.label(), e.to_string()))?;
    if !response.is_success() {
        return Err(ReporterError::unavailable(
            kind.label(),
            format!("HTTP {}", response.status),
        ));
    }
    debug!("{} body: {}", kind, response.body);
    Ok(response.body)
}

/// Decode a vendor body into its response struct.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(kind: SourceKind, body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| ReporterError::unavailable(kind.label(), format!("malformed response: {e}")))
}

/// Reject prices no vendor should ever report.
pub(crate) fn valid_price(kind: SourceKind, price: Option<f64>) -> Result<f64> {
    match price {
        Some(p) if p.is_finite() && p > 0.0 => Ok(p),
        Some(p) => Err(ReporterError::unavailable(
            kind.label(),
            format!("invalid price {p}"),
        )),
        None => Err(ReporterError::unavailable(kind.label(), "price missing")),
    }
}
