//! Payload forwarded to the notification relay.
//!
//! The relay expects `market_data`, `news_list`, `date` and `time` keys. `build` is a
//! pure function of its inputs and the supplied instant, so two runs fed the same
//! upstream data only differ in the timestamp fields.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::market::MarketQuote;
use crate::result::Result;

/// Date format sent to the relay.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time format sent to the relay.
pub const TIME_FORMAT: &str = "%H:%M UTC";

/// JSON body posted to the relay once per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundPayload {
    /// Resolved gold quote. Always present; a run without one never builds a payload.
    pub market_data: MarketQuote,
    /// Cleaned, deduplicated headlines. May be empty.
    pub news_list: Vec<String>,
    /// Invocation date, `YYYY-MM-DD`.
    pub date: String,
    /// Invocation time, `HH:MM UTC`.
    pub time: String,
}

impl OutboundPayload {
    /// Assemble the payload for the instant `now`.
    pub fn build(quote: MarketQuote, headlines: Vec<String>, now: DateTime<Utc>) -> Self {
        OutboundPayload {
            market_data: quote,
            news_list: headlines,
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
        }
    }

    /// Encode the payload to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(self)?;
        Ok(json)
    }
}
