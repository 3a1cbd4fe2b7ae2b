//! Public application error type.
//!
//! Full detail is logged on the operator console; the caller only ever sees
//! a fixed generic message in a `{"error": "..."}` body. Upstream stack
//! traces and raw model error text never cross the HTTP boundary.

use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use ai_llm_service::LlmError;

use crate::core::extract::ExtractError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("question is missing or empty")]
    MissingQuestion,

    #[error("not found")]
    NotFound,

    /// A local read-only input (reference document, cat image, static page)
    /// could not be read.
    #[error("failed to read local resource {path}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The model's output did not contain the expected JSON object.
    #[error(transparent)]
    ModelOutput(#[from] ExtractError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) | AppError::MissingQuestion => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,

            // 5xx
            AppError::Llm(_)
            | AppError::Resource { .. }
            | AppError::ModelOutput(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed message sent to the caller; never includes upstream detail.
    fn public_message(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) | AppError::MissingQuestion => "question is required",
            AppError::NotFound => "not found",
            AppError::Resource { .. } => "reference data is unavailable",
            AppError::ModelOutput(_) => "the AI returned an unexpected answer format",
            AppError::Llm(_) | AppError::Bind(_) | AppError::Server(_) => {
                "failed to get an answer from the AI"
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = ?self, "client error");
        }
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert common Axum rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
