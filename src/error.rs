//! API error type and its [`IntoResponse`] mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Pessoa não existe")]
    NotFound,

    #[error("malformed body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("invalid birth date: {0}")]
    InvalidBirthDate(String),

    #[error("invalid stack: {0}")]
    InvalidStack(String),

    #[error(transparent)]
    Store(store::Error),
}

impl From<store::Error> for ApiError {
    fn from(error: store::Error) -> Self {
        match error {
            // Lost the race against a concurrent insert of the same nickname.
            store::Error::DuplicateNickname(_) => ApiError::Validation(ValidationError::DuplicateNickname),
            other => ApiError::Store(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(ValidationError::TypeMismatch(_)) | ApiError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidBirthDate(_) | ApiError::InvalidStack(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
