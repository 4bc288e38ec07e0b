//! # Error Types
//!
//! Domain-specific error types for havir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  havir-core errors (this file)                                         │
//! │  ├── CoreError        - Invoice contract violations                    │
//! │  ├── CatalogError     - Menu file could not be turned into a Catalog   │
//! │  └── ValidationError  - Field-level rule failures                      │
//! │                                                                         │
//! │  Counter app errors (in app)                                           │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogError ─┬─► AppError → operator         │
//! │        CoreError ──────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Out-of-range discounts are clamped and quantities at or below zero remove
//! the line. Neither ever produces a value from this module.

use thiserror::Error;

use crate::types::EntryId;

// =============================================================================
// Core Error
// =============================================================================

/// Invoice engine errors.
///
/// Both variants mean the caller passed an id it did not get from the
/// catalog or the invoice. The engine leaves its state untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The id does not name any catalog entry.
    #[error("Menu entry not found: {0}")]
    EntryNotFound(EntryId),

    /// A positive quantity was set for an entry that has no invoice line.
    ///
    /// ## When This Occurs
    /// ```text
    /// set_quantity("7", 3)   // "7" was never added
    ///      │
    ///      ▼
    /// LineNotFound("7")      // no line is created implicitly
    /// ```
    #[error("Menu entry {0} is not on the invoice")]
    LineNotFound(EntryId),
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Reasons a menu file cannot become a [`Catalog`](crate::catalog::Catalog).
///
/// Any of these is fatal to session start.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file is not valid JSON.
    #[error("Menu data is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The top level is not a `category → entries` object.
    #[error("Menu data must be an object of category name to entry list")]
    NotAnObject,

    /// A category maps to something other than an array.
    #[error("Category '{category}' must be a list of entries")]
    CategoryNotList { category: String },

    /// An entry is structurally wrong or fails a field rule.
    #[error("Invalid entry #{index} in '{category}': {reason}")]
    InvalidEntry {
        category: String,
        index: usize,
        reason: String,
    },

    /// Two entries share an id.
    #[error("Duplicate menu entry id '{0}'")]
    DuplicateId(EntryId),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a price with more decimals than the currency).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
