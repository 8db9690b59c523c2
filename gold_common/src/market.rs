//! Normalized market data produced by the price sources.
//!
//! Every vendor adapter maps its own response shape into a `MarketQuote`. Prices are
//! rounded to two decimals on construction so the relay always receives display-ready
//! values, and day high/low fall back to [`PriceLevel::Unavailable`] when the vendor
//! does not publish them.
use serde::{Serialize, Serializer};

/// Sentinel sent in place of a missing day high/low.
pub const UNAVAILABLE: &str = "unavailable";

/// Round a value to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change from `previous_close` to `current`, rounded to two decimals.
///
/// Returns `0.0` when the previous close is missing, zero or not finite.
pub fn change_percent(current: f64, previous_close: Option<f64>) -> f64 {
    match previous_close {
        Some(prev) if prev != 0.0 && prev.is_finite() => round2((current - prev) / prev * 100.0),
        _ => 0.0,
    }
}

/// A day high or low, or the vendor's lack of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceLevel {
    /// Level reported by the vendor, rounded to two decimals.
    Value(f64),
    /// The vendor does not provide this level.
    Unavailable,
}

impl PriceLevel {
    /// Builds a level from an optional vendor value; non-finite values count as missing.
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => PriceLevel::Value(round2(v)),
            _ => PriceLevel::Unavailable,
        }
    }
}

impl Serialize for PriceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PriceLevel::Value(v) => serializer.serialize_f64(*v),
            PriceLevel::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

/// Gold quote normalized from one vendor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketQuote {
    /// Last price in USD.
    pub price: f64,
    /// 24h (or since previous close) change in percent.
    pub change_percent: f64,
    /// Day high.
    pub high: PriceLevel,
    /// Day low.
    pub low: PriceLevel,
    /// Human-readable label of the vendor that produced this quote.
    pub source: String,
}

impl MarketQuote {
    /// Creates a quote, rounding price and change to two decimals.
    pub fn new(
        price: f64,
        change_percent: f64,
        high: PriceLevel,
        low: PriceLevel,
        source: impl Into<String>,
    ) -> Self {
        MarketQuote {
            price: round2(price),
            change_percent: round2(change_percent),
            high,
            low,
            source: source.into(),
        }
    }
}
