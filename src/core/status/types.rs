// Core types for website status checks

use serde::{Deserialize, Serialize};

/// Fixed probe timeout budget in milliseconds
pub const PROBE_TIMEOUT_MS: u64 = 8000;

/// User-Agent sent with every probe
pub const PROBE_USER_AGENT: &str = "WebsiteStatusChecker/1.0 (Rust/isahc)";

/// Accept header sent with every probe
pub const PROBE_ACCEPT: &str = "text/html,application/xhtml+xml,application/json";

/// Maximum redirect hops followed by a probe
pub const PROBE_MAX_REDIRECTS: u32 = 5;

/// Query parameters of `GET /check`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckRequest {
    pub url: Option<String>,
}

/// URL scheme of a canonical origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheme + host of the site being checked.
///
/// Status is defined per origin, so path, query, fragment and userinfo of
/// the user input never survive normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalOrigin {
    pub scheme: Scheme,
    pub host: String,
    /// Explicit non-default port, if the input carried one
    pub port: Option<u16>,
    /// `scheme://host[:port]`
    pub origin: String,
}

impl CanonicalOrigin {
    pub fn as_str(&self) -> &str {
        &self.origin
    }
}

impl std::fmt::Display for CanonicalOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.origin)
    }
}

/// Transport-level failure taxonomy, distinct from HTTP status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request exceeded the timeout budget
    Timeout,
    /// Name resolution failed (not found or temporary resolver failure)
    DnsNotFound,
    /// Peer actively refused the connection
    ConnectionRefused,
    /// Peer reset the connection
    ConnectionReset,
    /// Anything else at the transport layer
    OtherNetworkError,
}

impl ErrorKind {
    /// Stable errno-style code reported in the `error` field of responses
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "ETIMEDOUT",
            ErrorKind::DnsNotFound => "ENOTFOUND",
            ErrorKind::ConnectionRefused => "ECONNREFUSED",
            ErrorKind::ConnectionReset => "ECONNRESET",
            ErrorKind::OtherNetworkError => "ENETWORK",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of a single probe: exactly one variant is ever produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The target answered with an HTTP status (any code is valid)
    Responded { http_status: u16 },
    /// The request never produced a response
    TransportFailed { kind: ErrorKind, detail: String },
}

/// Liveness states a verdict can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivenessStatus {
    Up,
    UpWithClientError,
    Down,
    Unknown,
}

impl LivenessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LivenessStatus::Up => "up",
            LivenessStatus::UpWithClientError => "up_with_client_error",
            LivenessStatus::Down => "down",
            LivenessStatus::Unknown => "unknown",
        }
    }

    /// Human label: uppercased, underscores replaced by spaces
    pub fn label(&self) -> String {
        self.as_str().to_uppercase().replace('_', " ")
    }
}

impl std::fmt::Display for LivenessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final classified result for one check request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub status: LivenessStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_code: Option<u16>,
    /// ErrorKind code for transport failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    pub message: String,
    pub checked_url: String,
}
