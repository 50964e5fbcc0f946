use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("goal not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("storage write failed: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn storage(err: impl std::error::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("no API key configured for the advice service")]
    MissingCredential,
    #[error("advice request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed advice response: {0}")]
    Malformed(String),
    #[error("advice service error: {0}")]
    Service(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::not_found(err.to_string()),
            StoreError::InvalidInput(_) | StoreError::InvalidAmount(_) => {
                Self::bad_request(err.to_string())
            }
            StoreError::Storage(_) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
