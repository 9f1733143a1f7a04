//! # AppError
//!
//! Centralized error handling for the Wildtrails crates.
//! Nothing here is allowed to be fatal: every variant maps to a degraded
//! response in the web layer (flash message, empty state, or re-rendered
//! form), never a crash.

use std::fmt;

use thiserror::Error;

/// A single field-scoped validation message, produced before any
/// repository or storage call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The primary error type for all Wildtrails operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g. Destination, GalleryImage, Review).
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// One or more fields failed validation; blocks submission and never
    /// reaches the repository.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Missing or rejected identity (e.g. upload without a session,
    /// bad login credentials).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure carrying the provider message
    /// (database down, storage write failed).
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(kind: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(kind.to_string(), id.to_string())
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

/// A specialized Result type for Wildtrails logic.
pub type Result<T> = std::result::Result<T, AppError>;
