//! # Store Singleton
//!
//! At most one [`Database`] per application lifetime.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller A ──┐                                                           │
//! │  caller B ──┼──► StoreCell::get_or_open(config)                        │
//! │  caller C ──┘         │                                                 │
//! │                       ├── cell set?  ──yes──► &Database (fast path)    │
//! │                       │                                                 │
//! │                       └── no: take init lock                           │
//! │                              ├── set by a racer? ──► &Database         │
//! │                              └── Database::new(config)                 │
//! │                                     ├── Ok  ──► store, return          │
//! │                                     └── Err ──► cell stays empty       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::{Database, DbConfig};

/// Holds the application's single store handle.
///
/// Usually lives in a `static` (see [`get_instance`]); tests create their
/// own cells for isolation.
#[derive(Debug)]
pub struct StoreCell {
    cell: OnceCell<Database>,
}

impl StoreCell {
    pub const fn new() -> Self {
        StoreCell {
            cell: OnceCell::const_new(),
        }
    }

    /// Returns the store, opening it on first use.
    ///
    /// `config` is only consulted by the call that actually opens the store;
    /// later calls get the existing handle whatever they pass.
    pub async fn get_or_open(&self, config: DbConfig) -> DbResult<&Database> {
        if let Some(db) = self.cell.get() {
            return Ok(db);
        }

        self.cell
            .get_or_try_init(|| async {
                info!(path = %config.database_path.display(), "Opening store");
                Database::new(config).await
            })
            .await
    }

    /// Returns the store if it has been opened.
    pub fn get(&self) -> Option<&Database> {
        self.cell.get()
    }

    pub fn is_open(&self) -> bool {
        self.cell.initialized()
    }
}

impl Default for StoreCell {
    fn default() -> Self {
        StoreCell::new()
    }
}

static GLOBAL: StoreCell = StoreCell::new();

/// Returns the process-wide store, opening it with `config` on first use.
pub async fn get_instance(config: DbConfig) -> DbResult<&'static Database> {
    if GLOBAL.is_open() {
        debug!("Reusing process-wide store");
    }
    GLOBAL.get_or_open(config).await
}
