//! Delivery of the payload to the notification relay.
//!
//! The relay is a small HTTP worker that authenticates callers with a shared secret
//! header and turns the JSON body into a chat message. `RelayClient::send` reports
//! what happened; whether a failed delivery ends the run is decided by the caller.
use std::time::Duration;

use gold_common::net::{JSON_CONTENT_TYPE, SECRET_HEADER};
use gold_common::{OutboundPayload, ReporterError, Result};
use log::{debug, error, info, warn};

use crate::http::HttpTransport;

/// Result of one relay call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Relay answered 2xx.
    Delivered { status: u16 },
    /// Relay answered with a non-success status.
    Rejected { status: u16, body: String },
    /// Relay could not be reached.
    Unreachable(String),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }

    /// Converts a failed outcome into [`ReporterError::DeliveryFailure`].
    pub fn into_result(self) -> Result<u16> {
        match self {
            DeliveryOutcome::Delivered { status } => Ok(status),
            DeliveryOutcome::Rejected { status, body } => Err(ReporterError::DeliveryFailure {
                status: Some(status),
                body,
            }),
            DeliveryOutcome::Unreachable(reason) => Err(ReporterError::DeliveryFailure {
                status: None,
                body: reason,
            }),
        }
    }
}

pub struct RelayClient {
    endpoint_url: String,
    shared_secret: String,
    timeout: Duration,
}

impl RelayClient {
    /// Fails with [`ReporterError::ConfigurationMissing`] when `endpoint_url` is blank.
    pub fn new(endpoint_url: &str, shared_secret: &str, timeout: Duration) -> Result<Self> {
        let endpoint_url = endpoint_url.trim();
        if endpoint_url.is_empty() {
            return Err(ReporterError::ConfigurationMissing(
                "relay endpoint URL (WORKER_URL)".to_string(),
            ));
        }
        Ok(Self {
            endpoint_url: endpoint_url.to_string(),
            shared_secret: shared_secret.to_string(),
            timeout,
        })
    }

    pub fn send(&self, http: &dyn HttpTransport, payload: &OutboundPayload) -> Result<DeliveryOutcome> {
        let body = payload.to_json_bytes()?;
        let headers = [
            (SECRET_HEADER, self.shared_secret.as_str()),
            ("Content-Type", JSON_CONTENT_TYPE),
        ];

        info!("Sending payload to relay {}", self.endpoint_url);
        let outcome = match http.post_json(&self.endpoint_url, &headers, body, self.timeout) {
            Ok(response) if response.is_success() => {
                info!("Relay accepted payload: {}", response.status);
                debug!("Relay response: {}", response.body);
                DeliveryOutcome::Delivered {
                    status: response.status,
                }
            }
            Ok(response) => {
                warn!("Relay rejected payload: {} {}", response.status, response.body);
                DeliveryOutcome::Rejected {
                    status: response.status,
                    body: response.body,
                }
            }
            Err(e) => {
                error!("Failed to reach relay: {}", e);
                DeliveryOutcome::Unreachable(e.to_string())
            }
        };
        Ok(outcome)
    }
}
