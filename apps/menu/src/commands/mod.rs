//! # Commands Module
//!
//! Entry points the presentation layer calls.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! └── pizza.rs    ◄─── Form submission, delete, live list
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Add/Edit dialog "Save"                                                │
//! │         │  PizzaForm (raw text fields)                                  │
//! │         ▼                                                               │
//! │  submit_pizza_form(&menu, &form) -> Result<SubmitOutcome, ApiError>    │
//! │         │                                                               │
//! │         ├── Err(ApiError)  → show message, dialog stays open           │
//! │         └── Ok(outcome)    → show outcome.message, close dialog        │
//! │                               list refreshes through get_pizzas()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod pizza;
