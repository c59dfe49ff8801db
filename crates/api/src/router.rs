use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{
    AppState, auth_handlers, middleware as auth_middleware, role_handlers, user_handlers,
};

pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(|| async { "Gatekit API running" }))
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login));

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .route("/role", post(role_handlers::create_role))
        .route("/user", get(user_handlers::list_users))
        .route("/user/{id}/assign-role", post(user_handlers::assign_role))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    // Admin routes (require the admin role, declared right here)
    let admin_routes = Router::new()
        .route("/user/{id}", delete(user_handlers::remove_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_roles(&["admin"]),
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .with_state(state)
}
