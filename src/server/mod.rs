//! HTTP service
//!
//! ```text
//! /        - service liveness
//! /check   - website status check (?url=<address>)
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::CheckError;
pub use handlers::{check_handler, root_handler};
pub use state::AppState;

use crate::config::ServiceConfig;
use crate::core::debug_logger::get_debug_logger;
use axum::http::{HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyOrigin, CorsLayer};

/// Build the router with CORS and panic-to-500 conversion applied
pub fn build_router(state: AppState, config: &ServiceConfig) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/check", get(check_handler))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(config))
}

/// CORS policy: every origin unless an explicit allow-list is configured
pub fn cors_layer(config: &ServiceConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::OPTIONS]);

    if config.allows_any_origin() {
        return layer.allow_origin(AnyOrigin);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim_end_matches('/')) {
            Ok(value) => Some(value),
            Err(_) => {
                get_debug_logger().warn_sync(
                    "Server",
                    "cors_origin_ignored",
                    &format!("CORS origin '{}' is not a valid header value", origin),
                );
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    let error = CheckError::Internal {
        code: "UNKNOWN_ERROR".to_string(),
        message: format!("An unexpected error occurred: {}", detail),
        checked_url: None,
    };
    get_debug_logger().error_sync("Server", "handler_panic", &error.to_string());
    error.into_response()
}

/// Bind the listener and serve until SIGINT/SIGTERM
pub async fn run(config: &ServiceConfig, state: AppState) -> std::io::Result<()> {
    let addr = config
        .socket_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let logger = get_debug_logger();
    logger.server_started(&local_addr.to_string());

    axum::serve(listener, build_router(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    logger.server_stopped("Shutdown signal received");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => get_debug_logger().info_sync("Server", "signal", "SIGINT signal received: closing HTTP server"),
        _ = terminate => get_debug_logger().info_sync("Server", "signal", "SIGTERM signal received: closing HTTP server"),
    }
}
