//! # Validation Module
//!
//! Field-level rules for the [`Pizza`](crate::Pizza) entity.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (crate::form)                                           │
//! │  ├── Required-field presence                                           │
//! │  └── Number parsing (price, size)                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity setters (crate::types)                                │
//! │  └── THIS MODULE: price > 0, size > 0, status literal, non-empty text │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (status IN (...))                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pizzeria_core::validation::{validate_price, validate_size};
//!
//! assert!(validate_price(150.0).is_ok());
//! assert!(validate_size(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::PizzaStatus;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a pizza name.
///
/// ## Example
/// ```rust
/// use pizzeria_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Margherita ").unwrap(), "Margherita");
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<String> {
    validate_required("name", name)
}

/// Validates the ingredients list (free text, e.g. "tomato, mozzarella").
pub fn validate_ingredients(ingredients: &str) -> ValidationResult<String> {
    validate_required("ingredients", ingredients)
}

/// Validates a status literal and returns the typed status.
///
/// ## Example
/// ```rust
/// use pizzeria_core::validation::validate_status;
/// use pizzeria_core::PizzaStatus;
///
/// assert_eq!(validate_status("preparing").unwrap(), PizzaStatus::Preparing);
/// assert!(validate_status("sold").is_err());
/// ```
pub fn validate_status(status: &str) -> ValidationResult<PizzaStatus> {
    status.parse()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive (> 0); free pizzas are not a thing
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Form: Save Pizza                                                       │
/// │                                                                         │
/// │  User enters price: 0                                                  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_price(0.0) ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── NaN / inf? → Error: "price has invalid format"               │
/// │       │                                                                 │
/// │       ├── price <= 0? → Error: "price must be greater than zero"       │
/// │       │                                                                 │
/// │       └── OK → setter stores the value                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_price(price: f64) -> ValidationResult<f64> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

/// Validates a size (diameter in centimeters).
///
/// ## Rules
/// - Must be strictly positive (> 0)
pub fn validate_size(size: i32) -> ValidationResult<i32> {
    if size <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "size".to_string(),
        });
    }

    Ok(size)
}

// =============================================================================
// Unit Tests
// =============================================================================
