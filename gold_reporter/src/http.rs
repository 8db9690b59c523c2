//! Blocking HTTP transport used by every outbound call.
//!
//! Price sources, feeds and the relay all talk to the network through the
//! `HttpTransport` trait, so a run can be driven end to end against a scripted
//! transport in tests. The production implementation wraps a single
//! `reqwest::blocking::Client`; every request carries its own timeout.
use std::time::Duration;

use gold_common::net::{self, USER_AGENT};
use gold_common::{ReporterError, Result};
use log::debug;
use reqwest::blocking::Client;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        net::is_success(self.status)
    }
}

/// Minimal blocking HTTP surface needed by the reporter.
///
/// Implementations return `Err` only for transport-level failures (timeout,
/// connection refused, unreadable body). Non-2xx answers are `Ok` responses and
/// the caller decides what they mean.
pub trait HttpTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse>;

    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<HttpResponse>;
}

/// `reqwest` backed transport.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ReporterError::Http(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn read(response: reqwest::blocking::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ReporterError::Http(format!("Failed to read body: {e}")))?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| ReporterError::Http(format!("GET {url} failed: {e}")))?;
        Self::read(response)
    }

    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        debug!("POST {} ({} bytes)", url, body.len());
        let mut request = self.client.post(url).timeout(timeout).body(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .map_err(|e| ReporterError::Http(format!("POST {url} failed: {e}")))?;
        Self::read(response)
    }
}
