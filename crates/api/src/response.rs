use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Success envelope returned by the mutation endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

/// Build a 201 response carrying a message and the created payload.
pub fn created<T: Serialize>(message: &str, data: T) -> Response {
    let envelope = Envelope {
        message: message.to_string(),
        data,
    };
    (StatusCode::CREATED, Json(envelope)).into_response()
}
