use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;

use codex_claim_core::ClaimInput;

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::{ClaimResponse, INVALID_BODY_MESSAGE};

pub async fn claim_code(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClaimInput>, JsonRejection>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "rejected claim payload");
        ApiError::BadRequest(INVALID_BODY_MESSAGE.to_owned())
    })?;

    let outcome = state.claim_service.claim(&input).await?;
    Ok(Json(ClaimResponse::from(outcome)))
}
