//! `GET /api/additem`: grant a cosmetic plus its make-good gift box.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{check_api_key, error_response};
use crate::error::EngineError;
use crate::model::AppState;
use crate::services::operations::{self, AddItemReceipt};

#[derive(Deserialize)]
pub struct AddItemParams {
    apikey: Option<String>,
    username: Option<String>,
    cosmetics: Option<String>,
    reason: Option<String>,
}

pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AddItemParams>,
) -> Response {
    if let Err(resp) = check_api_key(&state, params.apikey.as_deref()) {
        return resp;
    }
    let Some(username) = params.username.as_deref() else {
        return error_response(EngineError::validation("missing username"));
    };
    let Some(cosmetics) = params.cosmetics.as_deref() else {
        return error_response(EngineError::validation("missing cosmetics"));
    };
    let Some(reason) = params.reason.as_deref() else {
        return error_response(EngineError::validation("missing reason"));
    };

    match operations::add_item(&state, username, cosmetics, reason).await {
        Ok(AddItemReceipt::AlreadyOwned) => Json(json!({
            "message": "The user already owns this cosmetic.",
        }))
        .into_response(),
        Ok(AddItemReceipt::Added {
            profile_revision,
            profile_command_revision,
            profile_changes,
        }) => Json(json!({
            "message": format!(
                "Successfully added the item '{cosmetics}' and a GiftBox to {username}'s profile."
            ),
            "profileRevision": profile_revision,
            "profileCommandRevision": profile_command_revision,
            "profileChanges": profile_changes,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}
