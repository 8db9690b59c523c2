//! Binance 24h ticker for PAXG/USDT. Numbers arrive as strings.
use std::time::Duration;

use gold_common::{MarketQuote, PriceLevel, ReporterError, Result, SourceKind};
use serde::Deserialize;

use super::{PriceSource, decode, get_body, valid_price};
use crate::http::HttpTransport;

pub const BINANCE_URL: &str = "https://api.binance.com/api/v3/ticker/24hr?symbol=PAXGUSDT";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24h {
    last_price: String,
    price_change_percent: String,
    high_price: Option<String>,
    low_price: Option<String>,
}

pub struct BinanceSource {
    url: String,
    timeout: Duration,
}

impl BinanceSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            url: BINANCE_URL.to_string(),
            timeout,
        }
    }
}

fn number(kind: SourceKind, field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| ReporterError::unavailable(kind.label(), format!("bad {field}: {raw:?}")))
}

pub fn parse(body: &str) -> Result<MarketQuote> {
    let kind = SourceKind::Binance;
    let ticker: Ticker24h = decode(kind, body)?;

    let price = valid_price(kind, Some(number(kind, "lastPrice", &ticker.last_price)?))?;
    let change = number(kind, "priceChangePercent", &ticker.price_change_percent)?;
    let change = if change.is_finite() { change } else { 0.0 };
    let high = ticker.high_price.and_then(|h| h.trim().parse().ok());
    let low = ticker.low_price.and_then(|l| l.trim().parse().ok());

    Ok(MarketQuote::new(
        price,
        change,
        PriceLevel::from_option(high),
        PriceLevel::from_option(low),
        kind.label(),
    ))
}

impl PriceSource for BinanceSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Binance
    }

    fn fetch(&self, http: &dyn HttpTransport) -> Result<MarketQuote> {
        let body = get_body(http, self.kind(), &self.url, self.timeout)?;
        parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_encoded_ticker() {
        let body = r#"{"symbol":"PAXGUSDT","priceChange":"10.12","priceChangePercent":"0.496",
            "lastPrice":"2050.12000000","highPrice":"2061.00000000","lowPrice":"2035.50000000"}"#;
        let quote = parse(body).unwrap();
        assert_eq!(quote.price, 2050.12);
        assert_eq!(quote.change_percent, 0.5);
        assert_eq!(quote.high, PriceLevel::Value(2061.0));
        assert_eq!(quote.low, PriceLevel::Value(2035.5));
        assert_eq!(quote.source, "Binance (PAXG/USDT)");
    }

    #[test]
    fn non_finite_change_falls_back_to_zero() {
        let body = r#"{"lastPrice":"2050.12","priceChangePercent":"NaN","highPrice":"2061.0","lowPrice":"2035.5"}"#;
        let quote = parse(body).unwrap();
        assert_eq!(quote.change_percent, 0.0);
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["change_percent"], 0.0);
    }

    #[test]
    fn error_payload_is_unavailable() {
        assert!(parse(r#"{"code":-1121,"msg":"Invalid symbol."}"#).is_err());
        assert!(
            parse(r#"{"lastPrice":"abc","priceChangePercent":"0.1"}"#).is_err()
        );
    }
}
