//! Shared networking constants used by the price sources, feeds and relay.
use std::time::Duration;

/// Header carrying the relay's shared secret.
pub const SECRET_HEADER: &str = "X-Secret-Key";
/// Content type declared on relay requests.
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// User agent sent with every request. Some quote endpoints reject empty agents.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) gold-reporter/0.1";

/// Default timeout for a single price source request.
pub const PRICE_TIMEOUT: Duration = Duration::from_secs(10);
/// Default timeout for a single news feed request.
pub const NEWS_TIMEOUT: Duration = Duration::from_secs(8);
/// Default timeout for the relay call. Longer, the relay works synchronously downstream.
pub const RELAY_TIMEOUT: Duration = Duration::from_secs(20);

/// Returns `true` for 2xx status codes.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
