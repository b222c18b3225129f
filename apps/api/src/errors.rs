use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::matching::engine::MatchError;
use crate::questionnaire::builder::ProfileError;
use crate::questionnaire::steps::step_for;
use crate::questionnaire::store::AnswerStoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Store(#[from] AnswerStoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details): (StatusCode, &str, String, Option<Value>) =
            match &self {
                AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
                AppError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
                }
                AppError::Profile(ProfileError::Validation { dimension, .. }) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    self.to_string(),
                    Some(json!({ "dimension": dimension, "step": step_for(*dimension) })),
                ),
                AppError::Profile(ProfileError::Incomplete { missing }) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INCOMPLETE_PROFILE",
                    self.to_string(),
                    Some(json!({
                        "missing": missing,
                        "next_step": missing.first().map(|d| step_for(*d)),
                    })),
                ),
                AppError::Match(MatchError::InvalidProfile {
                    dimension, missing, ..
                }) => {
                    let mut details = json!({ "missing": missing });
                    if let Some(dimension) = dimension {
                        details["dimension"] = json!(dimension);
                        details["step"] = json!(step_for(*dimension));
                    }
                    (
                        StatusCode::BAD_REQUEST,
                        "INVALID_PROFILE",
                        self.to_string(),
                        Some(details),
                    )
                }
                AppError::Match(MatchError::InvalidArgument(msg)) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_ARGUMENT",
                    msg.clone(),
                    None,
                ),
                AppError::Match(MatchError::EmptyCatalog) => {
                    tracing::error!("Match error: {self}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "MATCH_ERROR",
                        "Recommendations are unavailable".to_string(),
                        None,
                    )
                }
                AppError::Store(e) => {
                    tracing::error!("Answer store error: {e}");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "STORE_UNAVAILABLE",
                        "Questionnaire answers could not be stored".to_string(),
                        None,
                    )
                }
            };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
