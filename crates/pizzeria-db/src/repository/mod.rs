//! # Repository Module
//!
//! Database repository implementations for the pizzeria menu.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MenuState write worker                                                │
//! │       │                                                                 │
//! │       │  db.pizzas().update(&pizza)                                    │
//! │       ▼                                                                 │
//! │  PizzaRepository                                                       │
//! │  ├── list_all(&self)          → PizzaSubscription (live)               │
//! │  ├── insert(&self, pizza)     → Pizza with assigned id                 │
//! │  ├── update(&self, pizza)     → no-op when the id is gone              │
//! │  ├── delete(&self, pizza)     → no-op when the id is gone              │
//! │  └── get_by_id(&self, id)                                              │
//! │       │                                                                 │
//! │       │  SQL Query, then re-select + publish on PizzaFeed              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PizzaRepository`](pizza::PizzaRepository) - Pizza CRUD and the live list

pub mod pizza;
