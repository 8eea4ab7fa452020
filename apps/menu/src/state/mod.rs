//! # State Module
//!
//! Application state for the menu: the write coordinator and configuration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │         MenuState            │   │        ConfigState           │   │
//! │  │                              │   │                              │   │
//! │  │  Database (pool + feed)      │   │  database_path               │   │
//! │  │  mpsc::UnboundedSender       │   │  currency_symbol             │   │
//! │  │  worker JoinHandle           │   │  migration_policy            │   │
//! │  │                              │   │  log_filter                  │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • MenuState: submit never blocks, all writes on one worker task       │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod menu;

pub use config::{ConfigError, ConfigState, CONFIG_FILE, DEFAULT_LOG_FILTER};
pub use menu::{MenuState, QueueError, WriteOp, WriteOutcome, WriteTicket};
