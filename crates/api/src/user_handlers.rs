use auth::AuthError;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use store::UserWithRoles;

use crate::AppState;
use crate::error::{ApiError, ErrorResponse};

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserWithRoles>>, ApiError> {
    Ok(Json(state.users.find_all().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    pub role_name: String,
}

pub async fn assign_role(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(payload): Json<AssignRoleRequest>,
) -> Result<Response, ApiError> {
    state.users.assign_role(user_id, &payload.role_name).await?;

    let body = json!({ "message": "Role assigned successfully" });
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

pub async fn remove_user(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    match state.users.remove_user(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error @ AuthError::NotFound(_)) => ApiError::from(error).into_response(),
        Err(error) => {
            tracing::error!(%error, "failed to delete user");
            let body = ErrorResponse {
                error: "An error occurred while deleting the user".to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
