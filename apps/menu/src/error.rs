//! # API Error Type
//!
//! Unified error type for menu commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Pizzeria Menu                      │
//! │                                                                         │
//! │  Presentation                 Rust Backend                              │
//! │  ────────────                 ────────────                              │
//! │                                                                         │
//! │  submit_pizza_form(form)                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Blank field?  ── ValidationError::MissingFields ──┐            │  │
//! │  │  Not a number? ── CoreError::Parse ────────────────┤            │  │
//! │  │  Price <= 0?   ── ValidationError::MustBePositive ─┼─► ApiError │  │
//! │  │  Shut down?    ── QueueError::Closed ──────────────┤            │  │
//! │  │  Store failed? ── DbError (awaited ticket only) ───┘            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── { "code": "PARSE_ERROR",                                        │
//! │          "message": "Please enter valid numbers for price and size." } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::state::{ConfigError, QueueError};
use pizzeria_core::{CoreError, ValidationError};
use pizzeria_db::DbError;

/// Message shown when any required form field is blank.
pub const MSG_REQUIRED_FIELDS: &str = "Name, ingredients, price and size are required!";

/// Message shown when price or size is not a number.
pub const MSG_INVALID_NUMBERS: &str = "Please enter valid numbers for price and size.";

/// API error returned from menu commands.
///
/// ## Serialization
/// This is what the presentation layer receives when a command fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Input error: price must be greater than zero"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A field broke an entity rule, or a required field is blank
    ValidationError,

    /// Price or size is not a number
    ParseError,

    /// Store operation failed
    DatabaseError,

    /// Write worker has shut down
    QueueClosed,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingFields { .. } => ApiError::validation(MSG_REQUIRED_FIELDS),
            other => ApiError::validation(format!("Input error: {}", other)),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Parse { .. } => ApiError::new(ErrorCode::ParseError, MSG_INVALID_NUMBERS),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConstraintViolation { message } => {
                tracing::error!("Constraint violation: {}", message);
                ApiError::validation("Input error: the store rejected the values")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::SchemaMismatch { found, expected } => ApiError::new(
                ErrorCode::DatabaseError,
                format!(
                    "Database was written by schema version {}, this build expects {}",
                    found, expected
                ),
            ),
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts write queue errors to API errors.
impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::Closed => ApiError::new(ErrorCode::QueueClosed, "The menu is shutting down"),
            QueueError::Dropped => ApiError::internal("The change was interrupted"),
            QueueError::Storage(e) => ApiError::from(e),
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(message) => ApiError::validation(message),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
