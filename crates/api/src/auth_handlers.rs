use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use auth::{RegisterUser, issue_token, normalize_email};

use crate::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::response;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let user = state
        .accounts
        .register_user(RegisterUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(response::created("User created successfully", user))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let email = normalize_email(&payload.email);

    let Some((user, roles)) = state.accounts.validate_user(&email, &payload.password).await? else {
        let error = ErrorResponse {
            error: "Invalid credentials".to_string(),
        };
        return Ok((StatusCode::BAD_REQUEST, Json(error)).into_response());
    };

    let token = issue_token(
        &user.id.to_string(),
        roles,
        &state.jwt_secret,
        state.token_expiry_seconds,
    )?;

    Ok(response::created("Login was successful", json!({ "token": token })))
}
