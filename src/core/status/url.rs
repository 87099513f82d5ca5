//! Address Normalization
//!
//! Turns raw user input into a canonical origin:
//! - Input without an `http://` or `https://` prefix is checked over https
//! - Only scheme + host (+ explicit non-default port) survive
//! - Path, query, fragment and userinfo are discarded

use crate::core::status::types::{CanonicalOrigin, Scheme};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("Invalid URL format: {input}. Please provide a valid web address.")]
    InvalidAddress { input: String, detail: String },
}

impl UrlError {
    fn invalid(input: &str, detail: impl Into<String>) -> Self {
        UrlError::InvalidAddress {
            input: input.to_string(),
            detail: detail.into(),
        }
    }

    /// Parser detail explaining why the address was rejected
    pub fn detail(&self) -> &str {
        match self {
            UrlError::InvalidAddress { detail, .. } => detail,
        }
    }
}

/// Check whether input already carries an http(s) scheme (case-insensitive)
pub fn has_http_scheme(input: &str) -> bool {
    let lower = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Normalize a raw address into a canonical origin
///
/// # Examples
/// - `example.com` → `https://example.com`
/// - `http://example.com/path?q=1` → `http://example.com`
/// - `https://example.com:8443/x` → `https://example.com:8443`
/// - `https://example.com:443/x` → `https://example.com`
///
/// # Returns
/// * `Ok(CanonicalOrigin)` - Normalized origin
/// * `Err(UrlError)` - Malformed input, carrying the original text and parser detail
pub fn normalize_address(raw: &str) -> Result<CanonicalOrigin, UrlError> {
    let input = raw.trim();

    let prefixed = if has_http_scheme(input) {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&prefixed).map_err(|e| UrlError::invalid(raw, e.to_string()))?;

    let scheme = match url.scheme() {
        "http" => Scheme::Http,
        "https" => Scheme::Https,
        other => return Err(UrlError::invalid(raw, format!("unsupported scheme: {}", other))),
    };

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| UrlError::invalid(raw, "empty host"))?
        .to_string();

    // Url::port() already drops the scheme's default port
    let port = url.port().filter(|p| *p != scheme.default_port());

    let origin = match port {
        Some(port) => format!("{}://{}:{}", scheme, host, port),
        None => format!("{}://{}", scheme, host),
    };

    Ok(CanonicalOrigin {
        scheme,
        host,
        port,
        origin,
    })
}
