//! Fallback chain over the configured price sources.
use gold_common::{MarketQuote, ReporterError, Result};
use log::{info, warn};

use crate::http::HttpTransport;
use crate::sources::PriceSource;

/// Walks `sources` in priority order and returns the first quote obtained.
pub struct PriceResolver<'a> {
    sources: &'a [Box<dyn PriceSource>],
}

impl<'a> PriceResolver<'a> {
    pub fn new(sources: &'a [Box<dyn PriceSource>]) -> Self {
        Self { sources }
    }

    /// Returns [`ReporterError::AllSourcesExhausted`] when no source answers,
    /// including when the chain is empty.
    pub fn resolve(&self, http: &dyn HttpTransport) -> Result<MarketQuote> {
        for source in self.sources {
            info!("Fetching price from {}", source.kind().label());
            match source.fetch(http) {
                Ok(quote) => {
                    info!(
                        "Price found: ${:.2} ({:+.2}%) via {}",
                        quote.price, quote.change_percent, quote.source
                    );
                    return Ok(quote);
                }
                Err(e) => warn!("Skipping price source: {}", e),
            }
        }
        Err(ReporterError::AllSourcesExhausted)
    }
}
