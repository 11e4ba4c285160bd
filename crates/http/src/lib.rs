//! HTTP API server for codex-claim.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod response_types;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use codex_claim_service::ClaimService;

pub use response_types::{
    CLAIMED_MESSAGE, CONNECTION_MESSAGE, ClaimResponse, ClaimStatus, INVALID_BODY_MESSAGE,
    NOT_FOUND_MESSAGE, UNEXPECTED_MESSAGE, VersionResponse,
};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Service running the claim sequence against the sheet gateway
    pub claim_service: Arc<ClaimService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // The claim form is hosted elsewhere and posts JSON cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/claim", post(handlers::claim::claim_code))
        .layer(cors)
        .with_state(state)
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router).with_graceful_shutdown(shutdown).await
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
