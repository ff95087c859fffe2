//! `GET /api/addxp`: award XP to a player for a match event.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{check_api_key, error_response};
use crate::constants::LEVEL_CAP;
use crate::error::EngineError;
use crate::model::AppState;
use crate::progression::XpReason;
use crate::services::operations;

#[derive(Deserialize)]
pub struct AddXpParams {
    apikey: Option<String>,
    username: Option<String>,
    reason: Option<String>,
}

pub async fn add_xp(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AddXpParams>,
) -> Response {
    if let Err(resp) = check_api_key(&state, params.apikey.as_deref()) {
        return resp;
    }
    let Some(username) = params.username.as_deref() else {
        return error_response(EngineError::validation("missing username"));
    };
    let Some(reason) = params.reason.as_deref() else {
        return error_response(EngineError::validation("missing reason"));
    };
    let reason: XpReason = match reason.parse() {
        Ok(reason) => reason,
        Err(e) => return error_response(e),
    };

    match operations::add_xp(&state, username, reason).await {
        Ok(receipt) if receipt.capped => Json(json!({
            "status": "success",
            "message": format!("XP granting has been stopped at level {LEVEL_CAP}."),
            "newLevel": receipt.new_level,
        }))
        .into_response(),
        Ok(receipt) => Json(json!({
            "status": "success",
            "message": "XP added and level updated.",
            "newLevel": receipt.new_level,
            "leveledUp": receipt.leveled_up,
            "rewardsGranted": receipt.rewards_granted,
            "profileRevision": receipt.profile_revision,
            "profileCommandRevision": receipt.profile_command_revision,
            "profileChanges": receipt.profile_changes,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}
