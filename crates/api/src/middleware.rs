use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use auth::{Principal, authorize, verify_token};

use crate::AppState;
use crate::error::ErrorResponse;

fn unauthorized(message: String) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

/// Extract and verify the bearer token from the Authorization header
pub fn extract_principal(state: &AppState, headers: &HeaderMap) -> Result<Principal, Response> {
    let token = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| unauthorized("Missing or invalid Authorization header".to_string()))?;

    let claims = verify_token(token, &state.jwt_secret)
        .map_err(|e| unauthorized(format!("Invalid token: {}", e)))?;

    let id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| unauthorized("Invalid token".to_string()))?;

    Ok(Principal {
        id,
        roles: claims.roles,
    })
}

/// Middleware to require authentication
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let principal = extract_principal(&state, request.headers())?;

    // Store the principal in request extensions for handlers to access
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Middleware to require any one of the roles declared for the route
pub fn require_roles(
    required_roles: &'static [&'static str],
) -> impl Fn(
    State<Arc<AppState>>,
    Request,
    Next,
) -> Pin<Box<dyn Future<Output = Result<Response, Response>> + Send>>
+ Clone {
    move |State(state): State<Arc<AppState>>, mut request: Request, next: Next| {
        Box::pin(async move {
            let principal = extract_principal(&state, request.headers())?;

            authorize(required_roles, Some(&principal)).map_err(|e| {
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response()
            })?;

            request.extensions_mut().insert(principal);

            Ok(next.run(request).await)
        })
    }
}
