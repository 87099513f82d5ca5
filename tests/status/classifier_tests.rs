/*!
Tests for outcome classification.

Status code ranges, transport failure verdicts and message construction.
*/

use std::time::Duration;
use website_status_checker::core::status::classifier::transport_message;
use website_status_checker::core::status::{
    classify, classify_http_status, normalize_address, ErrorKind, LivenessStatus, ProbeOutcome,
    PROBE_TIMEOUT_MS,
};

fn budget() -> Duration {
    Duration::from_millis(PROBE_TIMEOUT_MS)
}

#[test]
fn test_classify_http_status_ranges() {
    for code in 200..400 {
        assert_eq!(classify_http_status(code), LivenessStatus::Up, "code {}", code);
    }
    for code in 400..500 {
        assert_eq!(classify_http_status(code), LivenessStatus::UpWithClientError, "code {}", code);
    }
    for code in 500..=599 {
        assert_eq!(classify_http_status(code), LivenessStatus::Down, "code {}", code);
    }
    for code in [0, 100, 101, 103, 199] {
        assert_eq!(classify_http_status(code), LivenessStatus::Unknown, "code {}", code);
    }
}

#[test]
fn test_classify_http_status_is_total() {
    // Every u16 maps somewhere, and codes past 599 are still server-side failures
    assert_eq!(classify_http_status(600), LivenessStatus::Down);
    assert_eq!(classify_http_status(u16::MAX), LivenessStatus::Down);
}

#[test]
fn test_responded_up() {
    let origin = normalize_address("example.com").unwrap();
    let verdict = classify(&ProbeOutcome::Responded { http_status: 200 }, &origin, budget());

    assert_eq!(verdict.status, LivenessStatus::Up);
    assert_eq!(verdict.http_code, Some(200));
    assert_eq!(verdict.error, None);
    assert_eq!(verdict.checked_url, "https://example.com");
    assert_eq!(verdict.message, "example.com is UP. Responded with status 200.");
}

#[test]
fn test_responded_client_error_label() {
    let origin = normalize_address("example.com").unwrap();
    let verdict = classify(&ProbeOutcome::Responded { http_status: 404 }, &origin, budget());

    assert_eq!(verdict.status, LivenessStatus::UpWithClientError);
    assert_eq!(verdict.http_code, Some(404));
    // Every underscore becomes a space
    assert!(verdict.message.starts_with("example.com is UP WITH CLIENT ERROR. "));
    assert!(verdict.message.contains("404"));
}

#[test]
fn test_responded_server_error() {
    let origin = normalize_address("https://api.example.com/v1").unwrap();
    let verdict = classify(&ProbeOutcome::Responded { http_status: 503 }, &origin, budget());

    assert_eq!(verdict.status, LivenessStatus::Down);
    assert_eq!(verdict.http_code, Some(503));
    assert!(verdict.message.starts_with("api.example.com is DOWN. "));
    assert!(verdict.message.contains("503"));
}

#[test]
fn test_responded_unknown() {
    let origin = normalize_address("example.com").unwrap();
    let verdict = classify(&ProbeOutcome::Responded { http_status: 101 }, &origin, budget());

    assert_eq!(verdict.status, LivenessStatus::Unknown);
    assert_eq!(verdict.http_code, Some(101));
    assert_eq!(verdict.message, "example.com is UNKNOWN. Responded with unknown status 101.");
}

#[test]
fn test_transport_failures_are_down_without_http_code() {
    let origin = normalize_address("example.com").unwrap();
    let kinds = [
        ErrorKind::Timeout,
        ErrorKind::DnsNotFound,
        ErrorKind::ConnectionRefused,
        ErrorKind::ConnectionReset,
        ErrorKind::OtherNetworkError,
    ];

    for kind in kinds {
        let outcome = ProbeOutcome::TransportFailed {
            kind,
            detail: "boom".to_string(),
        };
        let verdict = classify(&outcome, &origin, budget());
        assert_eq!(verdict.status, LivenessStatus::Down, "kind {:?}", kind);
        assert_eq!(verdict.http_code, None, "kind {:?}", kind);
        assert_eq!(verdict.error, Some(kind.code()), "kind {:?}", kind);
        assert!(verdict.message.contains("example.com"), "kind {:?}", kind);
        assert_eq!(verdict.checked_url, "https://example.com");
    }
}

#[test]
fn test_transport_messages_are_distinguishable() {
    let timeout = transport_message(ErrorKind::Timeout, "example.com", "", budget());
    let dns = transport_message(ErrorKind::DnsNotFound, "example.com", "", budget());
    let refused = transport_message(ErrorKind::ConnectionRefused, "example.com", "", budget());
    let reset = transport_message(ErrorKind::ConnectionReset, "example.com", "", budget());
    let other = transport_message(ErrorKind::OtherNetworkError, "example.com", "tls handshake", budget());

    assert_eq!(timeout, "Timeout: example.com took too long to respond (8000ms).");
    assert!(dns.starts_with("DNS Resolution Error: example.com could not be found."));
    assert!(refused.starts_with("Connection Refused: example.com refused the connection."));
    assert!(reset.starts_with("Connection Reset: example.com reset the connection."));
    assert_eq!(other, "Network Error: could not reach example.com (tls handshake).");

    let all = [&timeout, &dns, &refused, &reset, &other];
    for (i, a) in all.iter().enumerate() {
        for b in all.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_timeout_message_reports_budget() {
    let message = transport_message(ErrorKind::Timeout, "slow.example", "", Duration::from_millis(250));
    assert!(message.contains("(250ms)"));
}

#[test]
fn test_error_kind_codes() {
    assert_eq!(ErrorKind::Timeout.code(), "ETIMEDOUT");
    assert_eq!(ErrorKind::DnsNotFound.code(), "ENOTFOUND");
    assert_eq!(ErrorKind::ConnectionRefused.code(), "ECONNREFUSED");
    assert_eq!(ErrorKind::ConnectionReset.code(), "ECONNRESET");
    assert_eq!(ErrorKind::OtherNetworkError.code(), "ENETWORK");
}

#[test]
fn test_verdict_serialization() {
    let origin = normalize_address("example.com").unwrap();

    let up = classify(&ProbeOutcome::Responded { http_status: 200 }, &origin, budget());
    let json = serde_json::to_value(&up).unwrap();
    assert_eq!(json["status"], "up");
    assert_eq!(json["httpCode"], 200);
    assert_eq!(json["checkedUrl"], "https://example.com");
    assert!(json.get("error").is_none());

    let down = classify(
        &ProbeOutcome::TransportFailed {
            kind: ErrorKind::DnsNotFound,
            detail: String::new(),
        },
        &origin,
        budget(),
    );
    let json = serde_json::to_value(&down).unwrap();
    assert_eq!(json["status"], "down");
    assert_eq!(json["error"], "ENOTFOUND");
    assert!(json.get("httpCode").is_none());

    let client_error = classify(&ProbeOutcome::Responded { http_status: 404 }, &origin, budget());
    assert_eq!(serde_json::to_value(&client_error).unwrap()["status"], "up_with_client_error");
}

#[test]
fn test_classification_is_deterministic() {
    let origin = normalize_address("example.com").unwrap();
    let outcome = ProbeOutcome::Responded { http_status: 302 };
    let first = classify(&outcome, &origin, budget());
    let second = classify(&outcome, &origin, budget());
    assert_eq!(first, second);
}
