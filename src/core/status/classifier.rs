// Outcome classification: probe result -> liveness verdict

use crate::core::status::types::{
    CanonicalOrigin, ErrorKind, LivenessStatus, ProbeOutcome, Verdict,
};
use std::time::Duration;

/// Classify an HTTP status code into a liveness status
///
/// Total over every `u16`: 2xx/3xx are up, 4xx means the site answered but
/// refused the resource, 5xx and above is down, anything below 200 is unknown.
pub fn classify_http_status(status_code: u16) -> LivenessStatus {
    match status_code {
        200..=399 => LivenessStatus::Up,
        400..=499 => LivenessStatus::UpWithClientError,
        500.. => LivenessStatus::Down,
        _ => LivenessStatus::Unknown,
    }
}

/// Build the final verdict for one probe outcome
///
/// # Arguments
/// * `outcome` - What the probe observed
/// * `origin` - Origin that was probed (hostname appears in the message)
/// * `timeout` - Timeout budget, reported in timeout messages
pub fn classify(outcome: &ProbeOutcome, origin: &CanonicalOrigin, timeout: Duration) -> Verdict {
    match outcome {
        ProbeOutcome::Responded { http_status } => {
            let status = classify_http_status(*http_status);
            Verdict {
                status,
                http_code: Some(*http_status),
                error: None,
                message: format!(
                    "{} is {}. {}",
                    origin.host,
                    status.label(),
                    status_detail(status, *http_status)
                ),
                checked_url: origin.origin.clone(),
            }
        }
        ProbeOutcome::TransportFailed { kind, detail } => Verdict {
            status: LivenessStatus::Down,
            http_code: None,
            error: Some(kind.code()),
            message: transport_message(*kind, &origin.host, detail, timeout),
            checked_url: origin.origin.clone(),
        },
    }
}

fn status_detail(status: LivenessStatus, code: u16) -> String {
    match status {
        LivenessStatus::Up => format!("Responded with status {}.", code),
        LivenessStatus::UpWithClientError => format!(
            "Responded with client error status {}. Site is reachable but resource might be unavailable/forbidden.",
            code
        ),
        LivenessStatus::Down => format!(
            "Responded with server error status {}. Server issues detected.",
            code
        ),
        LivenessStatus::Unknown => format!("Responded with unknown status {}.", code),
    }
}

/// Human explanation of a transport failure
pub fn transport_message(kind: ErrorKind, host: &str, detail: &str, timeout: Duration) -> String {
    match kind {
        ErrorKind::Timeout => format!(
            "Timeout: {} took too long to respond ({}ms).",
            host,
            timeout.as_millis()
        ),
        ErrorKind::DnsNotFound => format!(
            "DNS Resolution Error: {} could not be found. (Domain might not exist or network issue)",
            host
        ),
        ErrorKind::ConnectionRefused => format!(
            "Connection Refused: {} refused the connection. (Server might be down or firewall blocking)",
            host
        ),
        ErrorKind::ConnectionReset => format!(
            "Connection Reset: {} reset the connection. (Server might be overloaded or dropping connections)",
            host
        ),
        ErrorKind::OtherNetworkError => {
            if detail.is_empty() {
                format!("Network Error: could not reach {}.", host)
            } else {
                format!("Network Error: could not reach {} ({}).", host, detail)
            }
        }
    }
}
