//! # Pizza Repository
//!
//! Database operations for the `pizzas` table.
//!
//! ## Key Operations
//! - Live, newest-first list (`list_all`)
//! - Insert / update / delete by id
//! - Feed refresh after every change
//!
//! Each call is its own statement; nothing spans calls in a transaction.
//! Writes are expected to come from a single serial worker, so refreshes
//! publish in the same order the writes happened.
//!
//! A write that committed reports success even if the follow-up refresh
//! fails; subscribers keep the previous list until the next refresh.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::feed::{PizzaFeed, PizzaSubscription};
use pizzeria_core::Pizza;

const SELECT_PIZZAS: &str = r#"
    SELECT id, name, ingredients, price, size, description, status
    FROM pizzas
"#;

/// Repository for pizza database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.pizzas();
///
/// let saved = repo.insert(&Pizza::new("Margherita", "tomato, mozzarella", 150.0, 30)?).await?;
/// let mut live = repo.list_all();
/// assert_eq!(live.current()[0].id(), saved.id());
/// ```
#[derive(Debug, Clone)]
pub struct PizzaRepository {
    pool: SqlitePool,
    feed: Arc<PizzaFeed>,
}

impl PizzaRepository {
    /// Creates a repository publishing to `feed`.
    pub fn new(pool: SqlitePool, feed: Arc<PizzaFeed>) -> Self {
        PizzaRepository { pool, feed }
    }

    /// Subscribes to every pizza, ordered by id descending.
    ///
    /// The subscription starts at the latest published list and is updated
    /// after each successful insert, update or delete.
    pub fn list_all(&self) -> PizzaSubscription {
        self.feed.subscribe()
    }

    /// Selects every pizza, newest first.
    pub async fn fetch_all(&self) -> DbResult<Vec<Pizza>> {
        let pizzas = sqlx::query_as::<_, Pizza>(&format!("{SELECT_PIZZAS} ORDER BY id DESC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(pizzas)
    }

    /// Gets a pizza by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Pizza))` - Pizza found
    /// * `Ok(None)` - Pizza not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Pizza>> {
        let pizza = sqlx::query_as::<_, Pizza>(&format!("{SELECT_PIZZAS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(pizza)
    }

    /// Number of stored pizzas.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pizzas")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts a new pizza and returns it with the store-assigned id.
    ///
    /// Any id already set on `pizza` is ignored.
    pub async fn insert(&self, pizza: &Pizza) -> DbResult<Pizza> {
        debug!(name = %pizza.name(), "Inserting pizza");

        let result = sqlx::query(
            r#"
            INSERT INTO pizzas (name, ingredients, price, size, description, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(pizza.name())
        .bind(pizza.ingredients())
        .bind(pizza.price())
        .bind(pizza.size())
        .bind(pizza.description())
        .bind(pizza.status().as_str())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Pizza inserted");

        self.publish_after_write().await;
        Ok(pizza.clone().with_id(id))
    }

    /// Overwrites every field of the row matching `pizza.id()`.
    ///
    /// A pizza without an id, or whose row no longer exists, is a no-op.
    pub async fn update(&self, pizza: &Pizza) -> DbResult<()> {
        let Some(id) = pizza.id() else {
            debug!(name = %pizza.name(), "Update skipped: pizza has no id");
            return Ok(());
        };

        let result = sqlx::query(
            r#"
            UPDATE pizzas SET
                name = ?1,
                ingredients = ?2,
                price = ?3,
                size = ?4,
                description = ?5,
                status = ?6
            WHERE id = ?7
            "#,
        )
        .bind(pizza.name())
        .bind(pizza.ingredients())
        .bind(pizza.price())
        .bind(pizza.size())
        .bind(pizza.description())
        .bind(pizza.status().as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(id, "Update matched no row");
            return Ok(());
        }

        debug!(id, "Pizza updated");
        self.publish_after_write().await;
        Ok(())
    }

    /// Removes the row matching `pizza.id()`.
    ///
    /// A pizza without an id, or whose row no longer exists, is a no-op.
    pub async fn delete(&self, pizza: &Pizza) -> DbResult<()> {
        let Some(id) = pizza.id() else {
            debug!(name = %pizza.name(), "Delete skipped: pizza has no id");
            return Ok(());
        };

        let result = sqlx::query("DELETE FROM pizzas WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(id, "Delete matched no row");
            return Ok(());
        }

        debug!(id, "Pizza deleted");
        self.publish_after_write().await;
        Ok(())
    }

    /// Re-selects the list and publishes it to every subscriber.
    pub async fn refresh(&self) -> DbResult<()> {
        let pizzas = self.fetch_all().await?;
        debug!(count = pizzas.len(), "Publishing pizza list");
        self.feed.publish(pizzas);
        Ok(())
    }

    async fn publish_after_write(&self) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Write committed but the live list was not refreshed");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use pizzeria_core::PizzaStatus;

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn margherita() -> Pizza {
        Pizza::new("Margherita", "tomato, mozzarella", 150.0, 30).unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trip() {
        let db = setup().await;
        let repo = db.pizzas();

        let pizza = margherita().with_description("classic");
        let saved = repo.insert(&pizza).await.unwrap();
        assert!(saved.id().is_some());

        let loaded = repo.get_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.description(), Some("classic"));
        assert_eq!(loaded.status(), PizzaStatus::Available);
    }

    #[tokio::test]
    async fn test_margherita_appears_in_live_list() {
        let db = setup().await;
        let repo = db.pizzas();
        let live = repo.list_all();

        repo.insert(&margherita()).await.unwrap();

        let list = live.current();
        assert_eq!(list.len(), 1);
        assert!(list[0].id() >= Some(1));
        assert_eq!(list[0].name(), "Margherita");
        assert_eq!(list[0].price(), 150.0);
        assert_eq!(list[0].size(), 30);
        assert_eq!(list[0].status(), PizzaStatus::Available);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id_descending() {
        let db = setup().await;
        let repo = db.pizzas();

        for name in ["Margherita", "Diavola", "Quattro Formaggi", "Capricciosa"] {
            repo.insert(&Pizza::new(name, "cheese", 120.0, 30).unwrap())
                .await
                .unwrap();
        }

        let list = repo.list_all().current();
        assert_eq!(list.len(), 4);
        assert_eq!(list[0].name(), "Capricciosa");

        let ids: Vec<i64> = list.iter().filter_map(Pizza::id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(repo.fetch_all().await.unwrap(), list);
    }

    #[tokio::test]
    async fn test_status_update_is_published() {
        let db = setup().await;
        let repo = db.pizzas();
        let mut live = repo.list_all();

        let mut saved = repo.insert(&margherita()).await.unwrap();
        live.changed().await.unwrap();

        saved.set_status("preparing").unwrap();
        repo.update(&saved).await.unwrap();

        let list = live.changed().await.unwrap();
        assert_eq!(list[0].status(), PizzaStatus::Preparing);

        let loaded = repo.get_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.status(), PizzaStatus::Preparing);
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_noop() {
        let db = setup().await;
        let repo = db.pizzas();
        repo.insert(&margherita()).await.unwrap();

        repo.update(&margherita().with_id(999)).await.unwrap();
        repo.update(&margherita()).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = setup().await;
        let repo = db.pizzas();

        let saved = repo.insert(&margherita()).await.unwrap();
        let kept = repo
            .insert(&Pizza::new("Diavola", "salami", 189.0, 32).unwrap())
            .await
            .unwrap();

        repo.delete(&saved).await.unwrap();
        let after_first = repo.list_all().current();
        assert_eq!(after_first, vec![kept]);

        repo.delete(&saved).await.unwrap();
        repo.delete(&margherita()).await.unwrap();
        assert_eq!(repo.list_all().current(), after_first);
    }

    #[tokio::test]
    async fn test_insert_ignores_preset_id() {
        let db = setup().await;
        let repo = db.pizzas();

        let first = repo.insert(&margherita()).await.unwrap();
        let second = repo.insert(&first).await.unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_committed_write_succeeds_when_refresh_fails() {
        let db = setup().await;
        let repo = db.pizzas();

        // A text size passes the CHECK but cannot be read back as a number,
        // so every refresh from here on fails.
        sqlx::query(
            "INSERT INTO pizzas (name, ingredients, price, size, status) \
             VALUES ('Broken', 'cheese', 100.0, 'large', 'available')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        assert!(repo.fetch_all().await.is_err());

        let saved = repo.insert(&margherita()).await.unwrap();
        assert!(saved.id().is_some());
        assert_eq!(repo.count().await.unwrap(), 2);

        let mut edited = saved.clone();
        edited.set_size(32).unwrap();
        repo.update(&edited).await.unwrap();
        repo.delete(&edited).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        assert!(repo.list_all().current().is_empty());
    }
}
