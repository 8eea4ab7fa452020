//! # Pizzeria Menu App Library
//!
//! Wires configuration, logging, the store and the write coordinator together
//! for a presentation frontend.
//!
//! ## Module Organization
//! ```text
//! pizzeria_app/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── menu.rs     ◄─── MenuState, write queue, WriteTicket
//! │   └── config.rs   ◄─── ConfigState (TOML)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── pizza.rs    ◄─── Form submit, delete, list rows
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let config = ConfigState::load_default()?;
//! let menu = pizzeria_app::start(&config).await?;
//!
//! let mut pizzas = commands::pizza::get_pizzas(&menu);
//! let outcome = commands::pizza::submit_pizza_form(&menu, &form)?;
//! show_toast(&outcome.message);
//!
//! menu.shutdown().await;
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use error::ApiError;
use pizzeria_db::get_instance;
use state::{ConfigState, MenuState, DEFAULT_LOG_FILTER};

/// Starts the menu.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with the configured filter                    │
/// │                                                                         │
/// │  2. Validate Configuration ───────────────────────────────────────────► │
/// │                                                                         │
/// │  3. Open the Store (once per process) ────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Schema version check per migration_policy                         │
/// │                                                                         │
/// │  4. Start MenuState ──────────────────────────────────────────────────► │
/// │     • Spawn the serial write worker                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn start(config: &ConfigState) -> Result<MenuState, ApiError> {
    init_tracing(&config.log_filter);

    info!("Starting pizzeria menu");

    config.validate()?;
    let db_config = config.db_config()?;
    info!(path = %db_config.database_path.display(), "Database path determined");

    let db = get_instance(db_config).await?;
    info!("Database connected and schema ready");

    Ok(MenuState::new(db.clone()))
}

/// Installs the global tracing subscriber.
///
/// An unparsable `filter` falls back to [`DEFAULT_LOG_FILTER`]. Calling this
/// again after a subscriber is installed does nothing.
pub fn init_tracing(filter: &str) {
    let (filter, fallback) = match EnvFilter::try_new(filter) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new(DEFAULT_LOG_FILTER), true),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    if installed && fallback {
        warn!(default = DEFAULT_LOG_FILTER, "Invalid log filter, using default");
    }
}
