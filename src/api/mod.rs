//! Thin HTTP surface over the operations layer.
//!
//! Request validation and the API-key equality check live here; everything
//! below this module is transport-agnostic.

pub mod items;
pub mod xp;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::EngineError;
use crate::model::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/addxp", get(xp::add_xp))
        .route("/api/additem", get(items::add_item))
        .with_state(state)
}

/// Maps the error taxonomy onto status codes and the `{code, error}` body.
pub(crate) fn error_response(err: EngineError) -> Response {
    let status = match &err {
        EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Conflict => StatusCode::CONFLICT,
        EngineError::Database(_) | EngineError::Document(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(target: "api", error = %err, "internal error");
        json!({ "code": status.as_u16().to_string(), "error": "Server error." })
    } else {
        json!({ "code": status.as_u16().to_string(), "error": err.to_string() })
    };
    (status, Json(body)).into_response()
}

/// API credential equality check, performed before the engine is invoked.
pub(crate) fn check_api_key(state: &AppState, supplied: Option<&str>) -> Result<(), Response> {
    match supplied {
        Some(key) if key == state.api_key => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "code": "401", "error": "Invalid or missing API key." })),
        )
            .into_response()),
    }
}
