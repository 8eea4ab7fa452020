//! # Database Migrations
//!
//! Embedded SQL migrations plus a schema version stamp.
//!
//! ## How Schema Preparation Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Preparation                                 │
//! │                                                                         │
//! │  Store open                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PRAGMA user_version  (persisted schema version)                       │
//! │       │                                                                 │
//! │       ├── == SCHEMA_VERSION ──────────► run pending migrations         │
//! │       │                                  (Current)                      │
//! │       │                                                                 │
//! │       ├── 0 and no tables ────────────► run migrations, stamp version  │
//! │       │                                  (Created)                      │
//! │       │                                                                 │
//! │       └── anything else (mismatch)                                     │
//! │              │                                                          │
//! │              ├── Destructive ─► DROP every table, migrate, stamp       │
//! │              │                  (Recreated, all rows lost)             │
//! │              │                                                          │
//! │              └── Strict ──────► DbError::SchemaMismatch                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. Bump [`SCHEMA_VERSION`] when the change is not backwards compatible
//! 4. **NEVER** modify existing migrations - always add new ones

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Schema version this build reads and writes.
pub const SCHEMA_VERSION: i64 = 1;

// =============================================================================
// Policy & Outcome
// =============================================================================

/// What to do when the persisted schema version does not match
/// [`SCHEMA_VERSION`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationPolicy {
    /// Drop everything and start with an empty schema.
    #[default]
    Destructive,
    /// Refuse to open the store.
    Strict,
}

/// How the schema was brought up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Empty database, schema created.
    Created,
    /// Versions matched; only pending migrations (if any) ran.
    Current,
    /// Version mismatch resolved by wiping the store.
    Recreated { from: i64 },
}

// =============================================================================
// Entry Points
// =============================================================================

/// Brings the schema to [`SCHEMA_VERSION`] according to `policy`.
pub async fn prepare_schema(pool: &SqlitePool, policy: MigrationPolicy) -> DbResult<SchemaStatus> {
    let found = schema_version(pool).await?;

    if found == SCHEMA_VERSION {
        run_migrations(pool).await?;
        return Ok(SchemaStatus::Current);
    }

    if found == 0 && user_tables(pool).await?.is_empty() {
        run_migrations(pool).await?;
        set_schema_version(pool, SCHEMA_VERSION).await?;
        info!(version = SCHEMA_VERSION, "Schema created");
        return Ok(SchemaStatus::Created);
    }

    match policy {
        MigrationPolicy::Strict => Err(DbError::SchemaMismatch {
            found,
            expected: SCHEMA_VERSION,
        }),
        MigrationPolicy::Destructive => {
            warn!(
                found,
                expected = SCHEMA_VERSION,
                "Schema version mismatch, recreating store (existing rows are discarded)"
            );
            drop_all_tables(pool).await?;
            run_migrations(pool).await?;
            set_schema_version(pool, SCHEMA_VERSION).await?;
            Ok(SchemaStatus::Recreated { from: found })
        }
    }
}

/// Runs all pending embedded migrations.
///
/// Idempotent: applied migrations are tracked in `_sqlx_migrations`.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Reads the persisted schema version (`0` for a never-stamped database).
pub async fn schema_version(pool: &SqlitePool) -> DbResult<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}

// =============================================================================
// Helpers
// =============================================================================

pub(crate) async fn set_schema_version(pool: &SqlitePool, version: i64) -> DbResult<()> {
    // PRAGMA arguments can't be bound; version is an integer we own.
    sqlx::query(&format!("PRAGMA user_version = {version}"))
        .execute(pool)
        .await?;
    Ok(())
}

async fn user_tables(pool: &SqlitePool) -> DbResult<Vec<String>> {
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    )
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

async fn drop_all_tables(pool: &SqlitePool) -> DbResult<()> {
    for table in user_tables(pool).await? {
        warn!(table = %table, "Dropping table");
        sqlx::query(&format!("DROP TABLE IF EXISTS \"{}\"", table.replace('"', "\"\"")))
            .execute(pool)
            .await?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
