//! # pizzeria-core: Pure Domain Logic for the Pizzeria Menu
//!
//! This crate holds the menu's entity and its rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pizzeria Menu Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (external)                         │   │
//! │  │        Pizza list ──► Add/Edit dialog ──► Delete confirm        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PizzaForm / PizzaSubscription          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               pizzeria-app (commands + MenuState)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pizzeria-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐     ┌───────────┐     ┌───────────┐            │   │
//! │  │   │   types   │     │   form    │     │ validation│            │   │
//! │  │   │   Pizza   │     │ PizzaForm │     │   rules   │            │   │
//! │  │   │  Status   │     │ PizzaDraft│     │           │            │   │
//! │  │   └───────────┘     └───────────┘     └───────────┘            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pizzeria-db (Database Layer)                    │   │
//! │  │          SQLite queries, migrations, live pizza feed            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Pizza` and `PizzaStatus`
//! - [`form`] - Parsing of add/edit form submissions
//! - [`validation`] - Field-level rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pizzeria_core::{Pizza, PizzaStatus};
//!
//! let mut pizza = Pizza::new("Margherita", "tomato, mozzarella", 150.0, 30).unwrap();
//! pizza.set_status("preparing").unwrap();
//! assert_eq!(pizza.status(), PizzaStatus::Preparing);
//!
//! // Rejected values leave the field untouched
//! assert!(pizza.set_size(-5).is_err());
//! assert_eq!(pizza.size(), 30);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use form::{PizzaDraft, PizzaForm};
pub use types::*;
pub use validation::ValidationResult;
