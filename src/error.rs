use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde::Serialize;
use std::time::Duration;
use utoipa::ToSchema;

/// Client input that cannot become an attendance record.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[display(fmt = "Card ID is required.")]
    MissingCardId,

    #[display(fmt = "Timestamp must be a valid date/time.")]
    InvalidTimestamp,

    #[display(fmt = "Request body must be valid JSON.")]
    MalformedBody,

    #[display(fmt = "Invalid query string: {}", _0)]
    InvalidQuery(String),
}

impl std::error::Error for ValidationError {}

/// Failure to read from or write to the persistence layer.
#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "storage call timed out after {:?}", _0)]
    Timeout(Duration),

    #[display(fmt = "storage backend error: {}", _0)]
    Backend(String),
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    Validation(ValidationError),

    #[display(fmt = "{}", _0)]
    Storage(StoreError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Card ID is required.")]
    pub message: String,
}

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // storage detail stays in the logs
        let message = match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Storage(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        HttpResponse::build(self.status_code()).json(MessageBody { message })
    }
}
