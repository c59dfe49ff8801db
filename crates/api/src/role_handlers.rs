use axum::{Json, extract::State, response::Response};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use crate::error::ApiError;
use crate::response;

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

pub async fn create_role(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRoleRequest>,
) -> Result<Response, ApiError> {
    let role = state
        .roles
        .create_role(payload.name.as_deref().unwrap_or(""), payload.permissions)
        .await?;

    Ok(response::created("Role created successfully", role))
}
