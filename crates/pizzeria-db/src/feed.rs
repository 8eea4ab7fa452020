//! # Pizza Feed
//!
//! The live, observable list of every pizza, newest first.
//!
//! ## How Changes Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Live List Publication                              │
//! │                                                                         │
//! │  PizzaRepository::insert / update / delete                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... FROM pizzas ORDER BY id DESC                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PizzaFeed::publish(list)  ── watch::Sender<Vec<Pizza>>                │
//! │       │                                                                 │
//! │       ├──► PizzaSubscription (list screen)                             │
//! │       ├──► PizzaSubscription (tests)                                   │
//! │       └──► ... every subscriber sees the latest list                   │
//! │                                                                         │
//! │  Latest-value semantics: a slow subscriber skips intermediate lists    │
//! │  but never misses the final state.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use pizzeria_core::Pizza;

/// Publisher side of the live list. One per [`Database`](crate::Database).
#[derive(Debug)]
pub struct PizzaFeed {
    tx: watch::Sender<Vec<Pizza>>,
}

impl PizzaFeed {
    /// Creates a feed holding an empty list.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        PizzaFeed { tx }
    }

    /// Replaces the current list and wakes every subscriber.
    ///
    /// Works with zero subscribers; later subscribers start from this list.
    pub fn publish(&self, pizzas: Vec<Pizza>) {
        self.tx.send_replace(pizzas);
    }

    /// Opens a new subscription starting at the current list.
    pub fn subscribe(&self) -> PizzaSubscription {
        PizzaSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Returns a copy of the current list.
    pub fn snapshot(&self) -> Vec<Pizza> {
        self.tx.borrow().clone()
    }

    /// Number of live subscriptions (diagnostics).
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for PizzaFeed {
    fn default() -> Self {
        PizzaFeed::new()
    }
}

/// Subscriber side of the live list.
///
/// Cloning a subscription gives an independent cursor over the same feed.
///
/// ## Usage
/// ```rust,ignore
/// let mut pizzas = db.pizzas().list_all();
/// render(pizzas.current());
///
/// while let Some(list) = pizzas.changed().await {
///     render(list);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PizzaSubscription {
    rx: watch::Receiver<Vec<Pizza>>,
}

impl PizzaSubscription {
    /// Returns the latest list without waiting.
    pub fn current(&self) -> Vec<Pizza> {
        self.rx.borrow().clone()
    }

    /// Waits for the next published list.
    ///
    /// Returns `None` once the store behind the feed is gone.
    pub async fn changed(&mut self) -> Option<Vec<Pizza>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Waits until the list satisfies `predicate` (checking the current
    /// list first) and returns it.
    pub async fn wait_for(
        &mut self,
        mut predicate: impl FnMut(&[Pizza]) -> bool,
    ) -> Option<Vec<Pizza>> {
        let list = self.rx.wait_for(|list| predicate(list.as_slice())).await.ok()?;
        Some(list.clone())
    }

    /// Converts the subscription into a `Stream` that yields the current
    /// list first and then every change.
    pub fn into_stream(self) -> WatchStream<Vec<Pizza>> {
        WatchStream::new(self.rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    fn pizza(id: i64, name: &str) -> Pizza {
        Pizza::new(name, "tomato", 100.0, 30).unwrap().with_id(id)
    }

    #[tokio::test]
    async fn test_new_subscriber_sees_latest_list() {
        let feed = PizzaFeed::new();
        feed.publish(vec![pizza(1, "Margherita")]);

        let sub = feed.subscribe();
        assert_eq!(sub.current().len(), 1);
        assert_eq!(feed.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_changed_delivers_next_publication() {
        let feed = PizzaFeed::new();
        let mut sub = feed.subscribe();

        feed.publish(vec![pizza(2, "Diavola"), pizza(1, "Margherita")]);

        let list = sub.changed().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name(), "Diavola");
    }

    #[tokio::test]
    async fn test_changed_returns_none_when_feed_dropped() {
        let feed = PizzaFeed::new();
        let mut sub = feed.subscribe();
        drop(feed);

        assert!(sub.changed().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_yields_current_then_changes() {
        let feed = PizzaFeed::new();
        let mut stream = feed.subscribe().into_stream();

        assert_eq!(stream.next().await.unwrap().len(), 0);

        feed.publish(vec![pizza(1, "Margherita")]);
        assert_eq!(stream.next().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_wait_for_checks_current_value() {
        let feed = PizzaFeed::new();
        feed.publish(vec![pizza(1, "Margherita")]);

        let mut sub = feed.subscribe();
        let list = sub.wait_for(|list| list.len() == 1).await.unwrap();
        assert_eq!(list[0].id(), Some(1));
    }
}
