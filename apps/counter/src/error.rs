//! # Counter Error Type
//!
//! Unified error type for counter commands and startup.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Havir Counter                          │
//! │                                                                         │
//! │  "qty 7 3"                                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<Outcome, AppError>                                       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Parse Error? ──── AppError::usage("...") ────────┐              │  │
//! │  │         │                                          │              │  │
//! │  │         ▼                                          ▼              │  │
//! │  │  Engine Error? ─── CoreError::LineNotFound ───── AppError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  error: [NotFound] Item 7 is not on the invoice                         │
//! │  (session continues)                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Startup errors (config, catalog) use the same type and end the process.

use havir_core::{CatalogError, CoreError};
use serde::Serialize;

use crate::state::ConfigError;

/// Error returned from counter commands and startup.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Menu entry not found: 7"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Menu entry or invoice line not found
    NotFound,

    /// Command arguments failed validation
    ValidationError,

    /// Menu file could not be parsed
    CatalogError,

    /// Environment configuration rejected
    ConfigError,

    /// File system operation failed
    IoError,

    /// Command word not recognised
    UnknownCommand,

    /// Internal error
    Internal,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a usage error for a known command with bad arguments.
    pub fn usage(usage: &str) -> Self {
        AppError::validation(format!("usage: {}", usage))
    }

    /// Creates an unknown command error.
    pub fn unknown_command(word: &str) -> Self {
        AppError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command '{}', type 'help'", word),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts engine errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EntryNotFound(id) => AppError::not_found("Menu entry", id.as_str()),
            CoreError::LineNotFound(id) => AppError::new(
                ErrorCode::NotFound,
                format!("Item {} is not on the invoice", id),
            ),
        }
    }
}

/// Converts menu file errors.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::new(ErrorCode::CatalogError, format!("Invalid menu file: {}", err))
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::IoError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
