//! Price vendors known to the reporter.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported price sources, listed on the command line in priority order.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "lower")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum SourceKind {
    /// Yahoo Finance gold futures chart (`GC=F`).
    Yahoo,
    /// CoinGecko simple price for PAX Gold.
    CoinGecko,
    /// Binance 24h ticker for PAXG/USDT.
    Binance,
}

impl SourceKind {
    /// Default fallback chain: primary first.
    pub const DEFAULT_ORDER: [SourceKind; 2] = [SourceKind::Yahoo, SourceKind::CoinGecko];

    /// Label attached to quotes produced by this source.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Yahoo => "Yahoo Finance (GC=F)",
            SourceKind::CoinGecko => "CoinGecko (PAXG)",
            SourceKind::Binance => "Binance (PAXG/USDT)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("YAHOO".parse::<SourceKind>().unwrap(), SourceKind::Yahoo);
        assert_eq!("coingecko".parse::<SourceKind>().unwrap(), SourceKind::CoinGecko);
        assert!("kitco".parse::<SourceKind>().is_err());
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(SourceKind::CoinGecko.to_string(), "coingecko");
    }
}
