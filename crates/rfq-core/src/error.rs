//! # Error Types
//!
//! Domain-specific error types for rfq-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rfq-core errors (this file)                                           │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Payload validation failures                    │
//! │                                                                         │
//! │  rfq-db errors (separate crate)                                        │
//! │  └── DbError          - Store operation failures                       │
//! │                                                                         │
//! │  rfq-pdf errors (separate crate)                                       │
//! │  └── RenderError      - Document generation failures                   │
//! │                                                                         │
//! │  rfq-api errors (in app)                                               │
//! │  └── ApiError         - What HTTP callers see (serialized)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No RFQ exists for the requested id.
    #[error("RFQ not found: {0}")]
    RfqNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before the store is touched, so a failing payload never causes a
/// partial write.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Too many line items in one RFQ.
    #[error("an RFQ cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// The id in the request path and the id in the body disagree.
    ///
    /// ## When This Occurs
    /// ```text
    /// PUT /rfq/7   { "id": 8, ... }
    ///      │
    ///      ▼
    /// IdMismatch { path_id: 7, body_id: 8 }  ← nothing is written
    /// ```
    #[error("RFQ ID mismatch: path {path_id}, body {body_id}")]
    IdMismatch { path_id: i64, body_id: i64 },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
