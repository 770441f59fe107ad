//! Backend Error Types
//!
//! This module defines error types specific to the backend server. These
//! errors are used in HTTP handlers and batch jobs and can be converted to
//! HTTP responses.
//!
//! # Error Categories
//!
//! - `HandlerError` - Errors that occur while processing an HTTP request
//! - `StoreError` - Database failures from the policy store
//! - `JobError` - A batch job failed before any data was fetched
//!
//! Partial batch failures are deliberately NOT errors at this level; the
//! jobs log per-item failures and keep going, reporting partial counts.

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing parameters, invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Database failure in the policy store
    #[error("Store error: {0}")]
    StoreError(#[from] sqlx::Error),

    /// A batch job failed outright, before processing any candidates
    #[error("Job error: {message}")]
    JobError {
        /// Human-readable error message
        message: String,
    },

    /// Shared error (from the shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new job error
    pub fn job(message: impl Into<String>) -> Self {
        Self::JobError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `StoreError` - 500 Internal Server Error
    /// - `JobError` - 500 Internal Server Error
    /// - `SharedError` - 400 for validation/policy, 500 for serialization
    /// - `SerializationError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::JobError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::PolicyError { .. } => StatusCode::CONFLICT,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StoreError(err) => err.to_string(),
            Self::JobError { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}
