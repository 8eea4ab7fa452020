//! # Domain Types
//!
//! The menu has exactly one entity: [`Pizza`].
//!
//! ## Entity Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌───────────────────────────┐        ┌─────────────────────────┐      │
//! │  │          Pizza            │        │      PizzaStatus        │      │
//! │  │  ───────────────────────  │        │  ─────────────────────  │      │
//! │  │  id (store-assigned)      │        │  Available  (default)   │      │
//! │  │  name         (required)  │───────►│  Preparing              │      │
//! │  │  ingredients  (required)  │        │  OutOfStock             │      │
//! │  │  price        (> 0)       │        └─────────────────────────┘      │
//! │  │  size         (> 0)       │                                         │
//! │  │  description  (optional)  │                                         │
//! │  │  status                   │                                         │
//! │  └───────────────────────────┘                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! A pizza starts transient (`id == None`), gets an id from the store on
//! insert, may be updated by id any number of times, and is finally deleted.
//! There is no soft delete.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{
    validate_ingredients, validate_name, validate_price, validate_size, ValidationResult,
};

// =============================================================================
// Pizza Status
// =============================================================================

/// Availability of a pizza on the menu.
///
/// Stored as its snake_case literal (`available`, `preparing`,
/// `out_of_stock`) in the `status` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PizzaStatus {
    /// Can be ordered right now.
    #[default]
    Available,
    /// Being prepared; temporarily not orderable.
    Preparing,
    /// Ran out of ingredients.
    OutOfStock,
}

impl PizzaStatus {
    /// Every status, in the order a status picker shows them.
    pub const ALL: [PizzaStatus; 3] = [
        PizzaStatus::Available,
        PizzaStatus::Preparing,
        PizzaStatus::OutOfStock,
    ];

    /// Returns the stored literal.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PizzaStatus::Available => "available",
            PizzaStatus::Preparing => "preparing",
            PizzaStatus::OutOfStock => "out_of_stock",
        }
    }

    /// Returns a human-readable label for display.
    pub const fn label(&self) -> &'static str {
        match self {
            PizzaStatus::Available => "Available",
            PizzaStatus::Preparing => "Preparing",
            PizzaStatus::OutOfStock => "Out of stock",
        }
    }
}

impl fmt::Display for PizzaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PizzaStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PizzaStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: PizzaStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Pizza
// =============================================================================

/// A pizza on the menu.
///
/// Fields are private so every mutation goes through a validating setter.
/// A failed setter leaves the previous value in place.
///
/// ## Example
/// ```rust
/// use pizzeria_core::{Pizza, PizzaStatus};
///
/// let mut pizza = Pizza::new("Margherita", "tomato, mozzarella", 150.0, 30).unwrap();
/// assert_eq!(pizza.status(), PizzaStatus::Available);
///
/// assert!(pizza.set_price(0.0).is_err());
/// assert_eq!(pizza.price(), 150.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    /// Store-assigned identifier; `None` until inserted.
    id: Option<i64>,

    /// Display name.
    name: String,

    /// Free-text ingredient list.
    ingredients: String,

    /// Price in the menu currency.
    price: f64,

    /// Diameter in centimeters.
    size: i32,

    /// Optional longer description.
    description: Option<String>,

    /// Availability.
    status: PizzaStatus,
}

impl Pizza {
    /// Creates a transient pizza with default status and no description.
    ///
    /// ## Errors
    /// Returns the first [`ValidationError`] among name, ingredients,
    /// price and size.
    pub fn new(
        name: &str,
        ingredients: &str,
        price: f64,
        size: i32,
    ) -> ValidationResult<Self> {
        Ok(Pizza {
            id: None,
            name: validate_name(name)?,
            ingredients: validate_ingredients(ingredients)?,
            price: validate_price(price)?,
            size: validate_size(size)?,
            description: None,
            status: PizzaStatus::default(),
        })
    }

    /// Returns the same pizza re-targeted at `id`.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the same pizza with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the same pizza with a status.
    pub fn with_status(mut self, status: PizzaStatus) -> Self {
        self.status = status;
        self
    }

    // -------------------------------------------------------------------------
    // Getters
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn status(&self) -> PizzaStatus {
        self.status
    }

    /// Checks if the store has assigned an id.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    /// Re-targets the pizza at another row (used when saving an edit).
    pub fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn set_name(&mut self, name: &str) -> ValidationResult<()> {
        self.name = validate_name(name)?;
        Ok(())
    }

    pub fn set_ingredients(&mut self, ingredients: &str) -> ValidationResult<()> {
        self.ingredients = validate_ingredients(ingredients)?;
        Ok(())
    }

    /// Sets the price.
    ///
    /// ## Errors
    /// `MustBePositive` if `price <= 0`, `InvalidFormat` if not finite.
    pub fn set_price(&mut self, price: f64) -> ValidationResult<()> {
        self.price = validate_price(price)?;
        Ok(())
    }

    /// Sets the size.
    ///
    /// ## Errors
    /// `MustBePositive` if `size <= 0`.
    pub fn set_size(&mut self, size: i32) -> ValidationResult<()> {
        self.size = validate_size(size)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Sets the status from its literal.
    ///
    /// ## Errors
    /// `NotAllowed` unless the literal is `available`, `preparing` or
    /// `out_of_stock`.
    pub fn set_status(&mut self, status: &str) -> ValidationResult<()> {
        self.status = status.parse()?;
        Ok(())
    }

    pub fn set_status_kind(&mut self, status: PizzaStatus) {
        self.status = status;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
