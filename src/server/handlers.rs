/*!
HTTP handlers.

`GET /check` drives one request through
`Received → Normalizing → Probing → Classified → Responded`, leaving early to
`Invalid` (400) on a missing or malformed address and to `InternalError`
(500) when the service itself fails. Exactly one response per request.

If the client disconnects mid-probe, hyper drops this handler's future and
with it the in-flight isahc transfer.
*/

use crate::core::debug_logger::{get_debug_logger, new_correlation_id};
use crate::core::status::{classify, normalize_address, CheckRequest, Verdict};
use crate::server::error::CheckError;
use crate::server::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::time::Instant;

pub const ROOT_MESSAGE: &str = "Website Status Checker Backend is running!";

/// `GET /` — liveness of the service itself
pub async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "message": ROOT_MESSAGE })))
}

/// `GET /check?url=<address>`
pub async fn check_handler(
    State(state): State<AppState>,
    query: Result<Query<CheckRequest>, QueryRejection>,
) -> Result<Json<Verdict>, CheckError> {
    let correlation_id = new_correlation_id();
    let logger = get_debug_logger();

    let result = run_check(&state, query, &correlation_id).await;
    if let Err(error) = &result {
        match error {
            CheckError::Internal { message, .. } => {
                logger.check_failed(error.code(), message, &correlation_id)
            }
            _ => logger.check_rejected(&error.to_string(), &correlation_id),
        }
    }
    result.map(Json)
}

async fn run_check(
    state: &AppState,
    query: Result<Query<CheckRequest>, QueryRejection>,
    correlation_id: &str,
) -> Result<Verdict, CheckError> {
    let logger = get_debug_logger();

    // Received
    let Query(request) = query.map_err(|e| CheckError::BadQuery(e.body_text()))?;
    logger.check_received(request.url.as_deref(), correlation_id);

    let raw = request
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or(CheckError::MissingAddress)?;

    // Normalizing
    let origin = normalize_address(&raw)?;

    // Probing
    let prober = state.prober();
    let timeout = prober.timeout();
    logger.probe_start(origin.as_str(), timeout.as_millis() as u64, correlation_id);
    let started = Instant::now();

    let outcome = prober
        .probe(&origin)
        .await
        .map_err(|e| CheckError::from_probe(e, origin.as_str()))?;

    // Classified
    let verdict = classify(&outcome, &origin, timeout);
    logger.probe_end(
        origin.as_str(),
        verdict.status.as_str(),
        verdict.http_code,
        verdict.error,
        started.elapsed().as_millis() as u64,
        correlation_id,
    );

    Ok(verdict)
}
