/*!
Single-shot reachability probe.

The probe executor issues exactly one GET to a canonical origin with a fixed
timeout budget and reports either the HTTP status it received or a typed
transport failure. No status code is treated as an error and nothing is
retried.

## Transport Failure Mapping

| isahc error kind          | ErrorKind                                   |
|---------------------------|---------------------------------------------|
| `Timeout`                 | `Timeout`                                   |
| `NameResolution`          | `DnsNotFound`                               |
| `ConnectionFailed`        | `ConnectionRefused` (or `ConnectionReset`)  |
| `Io`                      | curl code, then I/O kind, then message text |
| everything else           | `OtherNetworkError`                         |

## Dependencies

- `isahc`: HTTP client with per-request timeout and redirect policy
- `curl`: error codes behind isahc's `Io` kind (peer reset shows up as a recv/send failure)
- `async-trait`: object-safe async probe trait for dependency injection
*/

use crate::core::status::types::{
    CanonicalOrigin, ErrorKind, ProbeOutcome, PROBE_ACCEPT, PROBE_MAX_REDIRECTS,
    PROBE_TIMEOUT_MS, PROBE_USER_AGENT,
};
use std::time::Duration;

use isahc::config::{Configurable, RedirectPolicy};
use isahc::{HttpClient, Request};

/// Failures that happen before any network activity.
///
/// Transport failures are never reported here: they become
/// [`ProbeOutcome::TransportFailed`].
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to create HTTP client: {0}")]
    ClientInitialization(String),
    #[error("Probe request creation failed: {0}")]
    RequestBuild(String),
}

impl ProbeError {
    /// Error code reported in internal-failure responses
    pub fn code(&self) -> &'static str {
        match self {
            ProbeError::ClientInitialization(_) => "CLIENT_INIT_FAILED",
            ProbeError::RequestBuild(_) => "REQUEST_BUILD_FAILED",
        }
    }
}

/// Probe abstraction for dependency injection and testing
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Issue one request to `origin` and report what happened
    ///
    /// # Returns
    /// * `Ok(ProbeOutcome::Responded)` - Any HTTP status, 1xx-5xx
    /// * `Ok(ProbeOutcome::TransportFailed)` - DNS, connect, reset, timeout, other socket errors
    /// * `Err(ProbeError)` - The request could not be built at all
    async fn probe(&self, origin: &CanonicalOrigin) -> Result<ProbeOutcome, ProbeError>;

    /// Timeout budget applied to each probe
    fn timeout(&self) -> Duration;
}

/// Production prober using one shared isahc client.
///
/// The client is created once at startup and reused read-only by every
/// request; isahc pools connections internally.
pub struct IsahcProber {
    client: HttpClient,
    timeout: Duration,
}

impl IsahcProber {
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_timeout(Duration::from_millis(PROBE_TIMEOUT_MS))
    }

    /// Create a prober with a custom timeout budget (for testing)
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProbeError> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .redirect_policy(RedirectPolicy::Limit(PROBE_MAX_REDIRECTS))
            .build()
            .map_err(|e| ProbeError::ClientInitialization(e.to_string()))?;
        Ok(Self::from_client(client, timeout))
    }

    /// Wrap an already configured client
    pub fn from_client(client: HttpClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl Prober for IsahcProber {
    async fn probe(&self, origin: &CanonicalOrigin) -> Result<ProbeOutcome, ProbeError> {
        let request = Request::get(origin.as_str())
            .timeout(self.timeout)
            .header("User-Agent", PROBE_USER_AGENT)
            .header("Accept", PROBE_ACCEPT)
            .body(())
            .map_err(|e| ProbeError::RequestBuild(e.to_string()))?;

        // Dropping this future (client went away) aborts the transfer.
        match self.client.send_async(request).await {
            // Body is never read; dropping the response closes the transfer
            Ok(response) => Ok(ProbeOutcome::Responded {
                http_status: response.status().as_u16(),
            }),
            Err(err) => Ok(ProbeOutcome::TransportFailed {
                kind: map_transport_error(&err),
                detail: error_chain_text(&err),
            }),
        }
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Map an isahc transport error to the service's ErrorKind taxonomy
pub fn map_transport_error(err: &isahc::Error) -> ErrorKind {
    use isahc::error::ErrorKind as Kind;

    if err.is_timeout() {
        return ErrorKind::Timeout;
    }

    let io_kind = io_error_kind(err);
    let message = error_chain_text(err).to_lowercase();

    match err.kind() {
        Kind::Timeout => ErrorKind::Timeout,
        Kind::NameResolution => ErrorKind::DnsNotFound,
        Kind::ConnectionFailed => {
            if io_kind == Some(std::io::ErrorKind::ConnectionReset) || message.contains("reset") {
                ErrorKind::ConnectionReset
            } else {
                // curl folds every failed connect into one code; refusal is the common case
                ErrorKind::ConnectionRefused
            }
        }
        Kind::Io => curl_error_kind(err)
            .or_else(|| io_kind.map(classify_io_error_kind))
            .unwrap_or_else(|| classify_connection_message(&message)),
        _ => ErrorKind::OtherNetworkError,
    }
}

/// Map a std I/O error kind to ErrorKind
pub fn classify_io_error_kind(kind: std::io::ErrorKind) -> ErrorKind {
    match kind {
        std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
        std::io::ErrorKind::ConnectionRefused => ErrorKind::ConnectionRefused,
        std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::ConnectionAborted => {
            ErrorKind::ConnectionReset
        }
        _ => ErrorKind::OtherNetworkError,
    }
}

/// Classify a transport failure from its (lowercased) error text
///
/// Used when the error carries no structured I/O kind.
pub fn classify_connection_message(message: &str) -> ErrorKind {
    let message_lower = message.to_lowercase();
    if message_lower.contains("timed out") || message_lower.contains("timeout") {
        ErrorKind::Timeout
    } else if message_lower.contains("could not resolve")
        || message_lower.contains("couldn't resolve")
        || message_lower.contains("name resolution")
        || message_lower.contains("enotfound")
        || message_lower.contains("eai_again")
    {
        ErrorKind::DnsNotFound
    } else if message_lower.contains("connection refused") || message_lower.contains("econnrefused") {
        ErrorKind::ConnectionRefused
    } else if message_lower.contains("connection reset")
        || message_lower.contains("econnreset")
        || message_lower.contains("failure when receiving data from the peer")
        || message_lower.contains("failure when sending data to the peer")
    {
        ErrorKind::ConnectionReset
    } else {
        ErrorKind::OtherNetworkError
    }
}

fn io_error_kind(err: &isahc::Error) -> Option<std::io::ErrorKind> {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>() {
            return Some(io.kind());
        }
        source = inner.source();
    }
    None
}

/// Classify from the curl error code, when curl is the source
fn curl_error_kind(err: &isahc::Error) -> Option<ErrorKind> {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(curl_err) = inner.downcast_ref::<curl::Error>() {
            return classify_curl_error(curl_err);
        }
        source = inner.source();
    }
    None
}

/// Map a curl error code to ErrorKind, `None` for codes left to the other checks
///
/// A peer that drops the connection mid-transfer surfaces as a recv (56) or
/// send (55) failure rather than an I/O reset.
pub fn classify_curl_error(err: &curl::Error) -> Option<ErrorKind> {
    if err.is_operation_timedout() {
        Some(ErrorKind::Timeout)
    } else if err.is_couldnt_resolve_host() {
        Some(ErrorKind::DnsNotFound)
    } else if err.is_couldnt_connect() {
        Some(ErrorKind::ConnectionRefused)
    } else if err.is_recv_error() || err.is_send_error() {
        Some(ErrorKind::ConnectionReset)
    } else {
        None
    }
}

fn error_chain_text(err: &isahc::Error) -> String {
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}
