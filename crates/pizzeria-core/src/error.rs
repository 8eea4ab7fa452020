//! # Error Types
//!
//! Domain-specific error types for pizzeria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pizzeria-core errors (this file)                                      │
//! │  ├── CoreError        - Form parsing and domain errors                 │
//! │  └── ValidationError  - Entity invariant violations                    │
//! │                                                                         │
//! │  pizzeria-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  pizzeria-app errors                                                   │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Toast/Notification     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// Raised at the form boundary, closest to user input. None of these ever
/// reach the background write worker: a pizza that fails here is never
/// persisted.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A numeric form field could not be parsed.
    ///
    /// ## When This Occurs
    /// ```text
    /// Price field: "twelve"
    ///      │
    ///      ▼
    /// "twelve".parse::<f64>() fails
    ///      │
    ///      ▼
    /// Parse { field: "price", value: "twelve" }
    ///      │
    ///      ▼
    /// UI shows: "Please enter valid numbers for price and size."
    /// ```
    #[error("{field} is not a valid number: '{value}'")]
    Parse { field: String, value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a Parse error for a given field and raw input.
    pub fn parse(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::Parse {
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The entity setters return these synchronously; the offending field is
/// left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Several required form fields are empty at once.
    #[error("{} are required", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a non-finite price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Returns the name of the field that failed, if there is exactly one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => Some(field),
            ValidationError::MissingFields { .. } => None,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
