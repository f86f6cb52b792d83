use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const INVALID_SELECTION: &str = "Invalid index or options array";

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    MissingFields(String),

    #[error("{}", INVALID_SELECTION)]
    InvalidSelection,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Provider refused to answer: {0}")]
    Refusal(String),

    #[error("Provider request failed: {0}")]
    Upstream(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) | AppError::InvalidSelection | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Refusal(_)
            | AppError::Upstream(_)
            | AppError::MalformedResponse(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed: {}", message);
        } else {
            tracing::warn!("Rejected request: {}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
