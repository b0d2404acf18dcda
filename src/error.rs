//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.
//! Errors leaving the HTTP boundary are reduced to a stable kind and rendered
//! as a JSON envelope; provider and store details never reach the client.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image generation failed: {0}")]
    GenerationFailed(String),

    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    #[error("Startup failed: {0}")]
    StartupFailed(String),

    #[error("Image provider error: {0}")]
    AiProvider(String),

    #[error("Unexpected provider output format: {0}")]
    UnexpectedProviderFormat(String),

    #[error("Empty or invalid image URL: {0}")]
    EmptyOrInvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Stable, client-facing classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    GenerationFailed,
    PersistenceFailed,
    StartupFailed,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::GenerationFailed => "GENERATION_FAILED",
            ErrorKind::PersistenceFailed => "PERSISTENCE_FAILED",
            ErrorKind::StartupFailed => "STARTUP_FAILED",
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::GenerationFailed(_)
            | Error::AiProvider(_)
            | Error::UnexpectedProviderFormat(_)
            | Error::EmptyOrInvalidUrl(_)
            | Error::Http(_)
            | Error::Serialization(_) => ErrorKind::GenerationFailed,
            Error::PersistenceFailed(_) | Error::Database(_) => ErrorKind::PersistenceFailed,
            Error::StartupFailed(_) | Error::Config(_) | Error::Migration(_) | Error::Io(_) => {
                ErrorKind::StartupFailed
            }
        }
    }

    /// Human-readable message without the kind prefix used by `Display`.
    pub fn message(&self) -> String {
        match self {
            Error::InvalidInput(msg)
            | Error::GenerationFailed(msg)
            | Error::PersistenceFailed(msg)
            | Error::StartupFailed(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::GenerationFailed
            | ErrorKind::PersistenceFailed
            | ErrorKind::StartupFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            error: self.kind().code(),
            message: self.message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_errors_classify_as_generation_failed() {
        let errors = [
            Error::AiProvider("status 502".to_string()),
            Error::UnexpectedProviderFormat("number".to_string()),
            Error::EmptyOrInvalidUrl("".to_string()),
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::GenerationFailed);
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = Error::InvalidInput("prompt is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind().code(), "INVALID_INPUT");
        assert_eq!(err.message(), "prompt is required");
    }

    #[test]
    fn test_database_error_classifies_as_persistence() {
        let err = Error::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::PersistenceFailed);
    }
}
