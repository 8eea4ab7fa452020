//! # pizzeria-db: Database Layer for the Pizzeria Menu
//!
//! This crate provides the local SQLite store for the menu, using sqlx for
//! async operations and a watch channel for the live pizza list.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pizzeria Menu Data Flow                          │
//! │                                                                         │
//! │  MenuState write worker / list screen                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   pizzeria-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   StoreCell   │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │    │  (pizza.rs)   │    │  (embedded)  │  │   │
//! │  │   │       │       │    │       │       │    │              │  │   │
//! │  │   │   Database    │◄───│ PizzaRepo     │    │ 001_create_  │  │   │
//! │  │   │   (pool.rs)   │    │       │       │    │   pizzas.sql │  │   │
//! │  │   │               │    │       ▼       │    │ user_version │  │   │
//! │  │   │               │    │  PizzaFeed    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     pizzeria.db                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`store`] - One store handle per application
//! - [`migrations`] - Embedded migrations and schema version policy
//! - [`feed`] - Live pizza list
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pizzeria_db::{get_instance, DbConfig};
//!
//! let db = get_instance(DbConfig::new("path/to/pizzeria.db")).await?;
//!
//! let mut pizzas = db.pizzas().list_all();
//! db.pizzas().insert(&pizza).await?;
//! let latest = pizzas.changed().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod feed;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use feed::{PizzaFeed, PizzaSubscription};
pub use migrations::{MigrationPolicy, SchemaStatus, SCHEMA_VERSION};
pub use pool::{Database, DbConfig, DEFAULT_DATABASE_FILE};
pub use store::{get_instance, StoreCell};

// Repository re-exports for convenience
pub use repository::pizza::PizzaRepository;
