//! Website Status Checking
//!
//! Leaf-first pipeline for one check request:
//! - `url`: raw address → canonical origin
//! - `probe`: one bounded GET → status code or typed transport failure
//! - `classifier`: probe outcome → verdict with a human-readable message

pub mod classifier;
pub mod probe;
pub mod types;
pub mod url;

// Re-export public API
pub use classifier::{classify, classify_http_status};
pub use probe::{IsahcProber, ProbeError, Prober};
pub use types::*;
pub use url::{normalize_address, UrlError};
