//! CoinGecko simple price for PAX Gold, a token backed one-to-one by a troy ounce.
//!
//! The free tier answers `{ "pax-gold": { "usd": .., "usd_24h_change": .. } }` and
//! carries no day range, so high/low are always unavailable.
use std::time::Duration;

use gold_common::{MarketQuote, PriceLevel, ReporterError, Result, SourceKind};
use serde::Deserialize;

use super::{PriceSource, decode, get_body, valid_price};
use crate::http::HttpTransport;

pub const COINGECKO_URL: &str = "https://api.coingecko.com/api/v3/simple/price?ids=pax-gold&vs_currencies=usd&include_24hr_change=true";

#[derive(Debug, Deserialize)]
struct SimplePrice {
    #[serde(rename = "pax-gold")]
    pax_gold: Option<CoinPrice>,
}

#[derive(Debug, Deserialize)]
struct CoinPrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}

pub struct CoinGeckoSource {
    url: String,
    timeout: Duration,
}

impl CoinGeckoSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            url: COINGECKO_URL.to_string(),
            timeout,
        }
    }
}

pub fn parse(body: &str) -> Result<MarketQuote> {
    let kind = SourceKind::CoinGecko;
    let response: SimplePrice = decode(kind, body)?;
    let coin = response
        .pax_gold
        .ok_or_else(|| ReporterError::unavailable(kind.label(), "pax-gold missing"))?;

    let price = valid_price(kind, coin.usd)?;
    let change = coin.usd_24h_change.filter(|c| c.is_finite()).unwrap_or(0.0);

    Ok(MarketQuote::new(
        price,
        change,
        PriceLevel::Unavailable,
        PriceLevel::Unavailable,
        kind.label(),
    ))
}

impl PriceSource for CoinGeckoSource {
    fn kind(&self) -> SourceKind {
        SourceKind::CoinGecko
    }

    fn fetch(&self, http: &dyn HttpTransport) -> Result<MarketQuote> {
        let body = get_body(http, self.kind(), &self.url, self.timeout)?;
        parse(&body)
    }
}
