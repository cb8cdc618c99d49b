use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::routes::RouteError;

/// AppError
///
/// Infrastructure failures that abort a request with a 500. Access and CSRF outcomes are
/// not errors (see `gate::GateDecision`), and form validation problems are re-rendered
/// by the controllers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("session store failure: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("url generation failed: {0}")]
    Route(#[from] RouteError),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
