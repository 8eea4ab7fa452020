//! # Menu State
//!
//! The view-state coordinator: hands out the live pizza list and runs every
//! write on one background worker.
//!
//! ## Write Queue
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Serial Write Worker                                │
//! │                                                                         │
//! │  menu.insert(p1) ─┐                                                     │
//! │  menu.update(p2) ─┼──► mpsc (unbounded) ──────────► worker task        │
//! │  menu.delete(p3) ─┘        │                           │                │
//! │        │                   └─ gone? QueueError::Closed │ FIFO, one at  │
//! │        ▼                                               │ a time        │
//! │  WriteTicket ◄──────────── oneshot result ─────────────┘                │
//! │  (await it, or drop it)                                │                │
//! │                                                        ▼                │
//! │                                    PizzaRepository → PizzaFeed.publish │
//! │                                                        │                │
//! │  menu.get_all_pizzas() ◄── PizzaSubscription ◄─────────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shutdown
//! `shutdown(self)` closes the queue, lets the worker finish what is already
//! queued, then joins it.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use pizzeria_core::Pizza;
use pizzeria_db::{Database, DbError, DbResult, PizzaRepository, PizzaSubscription};

// =============================================================================
// Queue Types
// =============================================================================

/// A write waiting for the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Insert(Pizza),
    Update(Pizza),
    Delete(Pizza),
}

impl WriteOp {
    fn kind(&self) -> &'static str {
        match self {
            WriteOp::Insert(_) => "insert",
            WriteOp::Update(_) => "update",
            WriteOp::Delete(_) => "delete",
        }
    }
}

/// What a completed write did.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// Carries the pizza with its store-assigned id.
    Inserted(Pizza),
    Updated,
    Deleted,
}

/// Errors from submitting or awaiting a write.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The worker is gone. Nothing was enqueued.
    #[error("Write queue is closed")]
    Closed,

    /// The worker stopped before reporting the result.
    #[error("Write worker stopped before reporting the result")]
    Dropped,

    /// The write reached the store and failed there.
    #[error(transparent)]
    Storage(#[from] DbError),
}

struct WriteJob {
    seq: u64,
    op: WriteOp,
    respond_to: oneshot::Sender<DbResult<WriteOutcome>>,
}

/// Completion handle for one queued write.
///
/// Dropping the ticket does not cancel the write.
///
/// ## Usage
/// ```rust,ignore
/// // fire and forget
/// menu.insert(pizza)?;
///
/// // or wait for the store
/// let outcome = menu.insert(pizza)?.wait().await?;
/// ```
pub struct WriteTicket {
    seq: u64,
    rx: oneshot::Receiver<DbResult<WriteOutcome>>,
}

impl WriteTicket {
    /// Submission order of this write (starts at 1).
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Waits for the worker to run the write.
    pub async fn wait(self) -> Result<WriteOutcome, QueueError> {
        match self.rx.await {
            Ok(result) => Ok(result?),
            Err(_) => Err(QueueError::Dropped),
        }
    }
}

impl fmt::Debug for WriteTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteTicket").field("seq", &self.seq).finish()
    }
}

// =============================================================================
// Menu State
// =============================================================================

/// Live list plus the serial write worker.
///
/// The queue is unbounded: submitting never blocks and never turns a write
/// away while the worker is running.
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct MenuState {
    db: Database,
    sender: mpsc::UnboundedSender<WriteJob>,
    worker: JoinHandle<()>,
    pending: Arc<AtomicUsize>,
    next_seq: AtomicU64,
}

impl MenuState {
    /// Spawns the write worker for `db`.
    pub fn new(db: Database) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));
        let worker = tokio::spawn(run_worker(db.pizzas(), receiver, Arc::clone(&pending)));

        info!("Menu state ready");

        MenuState {
            db,
            sender,
            worker,
            pending,
            next_seq: AtomicU64::new(1),
        }
    }

    /// Live list of every pizza, newest first.
    pub fn get_all_pizzas(&self) -> PizzaSubscription {
        self.db.pizzas().list_all()
    }

    /// Queues an insert.
    pub fn insert(&self, pizza: Pizza) -> Result<WriteTicket, QueueError> {
        self.submit(WriteOp::Insert(pizza))
    }

    /// Queues an update. A pizza whose row is gone is a no-op.
    pub fn update(&self, pizza: Pizza) -> Result<WriteTicket, QueueError> {
        self.submit(WriteOp::Update(pizza))
    }

    /// Queues a delete. A pizza whose row is gone is a no-op.
    pub fn delete(&self, pizza: Pizza) -> Result<WriteTicket, QueueError> {
        self.submit(WriteOp::Delete(pizza))
    }

    /// Queues `op` behind every earlier write.
    ///
    /// ## Errors
    /// `QueueError::Closed` only if the worker has already exited.
    pub fn submit(&self, op: WriteOp) -> Result<WriteTicket, QueueError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let kind = op.kind();
        let (respond_to, rx) = oneshot::channel();

        self.pending.fetch_add(1, Ordering::AcqRel);
        if self.sender.send(WriteJob { seq, op, respond_to }).is_err() {
            self.pending.fetch_sub(1, Ordering::AcqRel);
            warn!(seq, op = kind, "Write queue closed, rejecting");
            return Err(QueueError::Closed);
        }

        debug!(seq, op = kind, "Write queued");
        Ok(WriteTicket { seq, rx })
    }

    /// Writes submitted but not yet finished by the worker.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// The store this coordinator writes to.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the queue, drains it, and waits for the worker to exit.
    pub async fn shutdown(self) {
        info!(pending = self.pending(), "Shutting down write worker");

        let MenuState { sender, worker, .. } = self;
        drop(sender);

        if let Err(e) = worker.await {
            error!(error = %e, "Write worker ended abnormally");
        }
    }
}

// =============================================================================
// Worker
// =============================================================================

async fn run_worker(
    repo: PizzaRepository,
    mut receiver: mpsc::UnboundedReceiver<WriteJob>,
    pending: Arc<AtomicUsize>,
) {
    debug!("Write worker started");

    while let Some(job) = receiver.recv().await {
        let WriteJob {
            seq,
            op,
            respond_to,
        } = job;
        let kind = op.kind();

        let result = match op {
            WriteOp::Insert(pizza) => repo.insert(&pizza).await.map(WriteOutcome::Inserted),
            WriteOp::Update(pizza) => repo.update(&pizza).await.map(|()| WriteOutcome::Updated),
            WriteOp::Delete(pizza) => repo.delete(&pizza).await.map(|()| WriteOutcome::Deleted),
        };

        match &result {
            Ok(_) => debug!(seq, op = kind, "Write applied"),
            Err(e) => error!(seq, op = kind, error = %e, "Write failed"),
        }
        pending.fetch_sub(1, Ordering::AcqRel);

        // Nobody waiting is fine
        let _ = respond_to.send(result);
    }

    debug!("Write worker stopped");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_core::PizzaStatus;
    use pizzeria_db::DbConfig;

    async fn setup() -> MenuState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        MenuState::new(db)
    }

    fn margherita() -> Pizza {
        Pizza::new("Margherita", "tomato, mozzarella", 150.0, 30).unwrap()
    }

    #[tokio::test]
    async fn test_insert_shows_up_in_live_list() {
        let menu = setup().await;
        let mut pizzas = menu.get_all_pizzas();

        let outcome = menu.insert(margherita()).unwrap().wait().await.unwrap();
        let WriteOutcome::Inserted(saved) = outcome else {
            panic!("expected insert outcome");
        };

        let list = pizzas.wait_for(|list| !list.is_empty()).await.unwrap();
        assert_eq!(list, vec![saved]);

        menu.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_rapid_updates_apply_in_order() {
        let menu = setup().await;

        // Every applied size lands in size_log, so the order the worker ran
        // the updates in is recorded exactly.
        sqlx::query("CREATE TABLE size_log (seq INTEGER PRIMARY KEY AUTOINCREMENT, size INTEGER)")
            .execute(menu.database().pool())
            .await
            .unwrap();
        sqlx::query(
            "CREATE TRIGGER log_size AFTER UPDATE OF size ON pizzas \
             BEGIN INSERT INTO size_log (size) VALUES (NEW.size); END",
        )
        .execute(menu.database().pool())
        .await
        .unwrap();

        let WriteOutcome::Inserted(mut pizza) =
            menu.insert(margherita()).unwrap().wait().await.unwrap()
        else {
            panic!("expected insert outcome");
        };

        let mut tickets = Vec::new();
        for size in 1..=20 {
            pizza.set_size(size).unwrap();
            tickets.push(menu.update(pizza.clone()).unwrap());
        }
        for ticket in tickets {
            assert_eq!(ticket.wait().await.unwrap(), WriteOutcome::Updated);
        }

        let applied: Vec<i32> = sqlx::query_scalar("SELECT size FROM size_log ORDER BY seq")
            .fetch_all(menu.database().pool())
            .await
            .unwrap();
        assert_eq!(applied, (1..=20).collect::<Vec<i32>>());

        let stored = menu
            .database()
            .pizzas()
            .get_by_id(pizza.id().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.size(), 20);

        menu.shutdown().await;
    }

    #[tokio::test]
    async fn test_rapid_inserts_keep_submission_order() {
        let menu = setup().await;

        let tickets: Vec<_> = (0..10)
            .map(|i| {
                menu.insert(Pizza::new(&format!("Pizza {i}"), "cheese", 100.0, 30).unwrap())
                    .unwrap()
            })
            .collect();

        let seqs: Vec<u64> = tickets.iter().map(WriteTicket::seq).collect();
        assert!(seqs.windows(2).all(|pair| pair[0] < pair[1]));

        for ticket in tickets {
            ticket.wait().await.unwrap();
        }

        let names: Vec<String> = menu
            .get_all_pizzas()
            .current()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        let expected: Vec<String> = (0..10).rev().map(|i| format!("Pizza {i}")).collect();
        assert_eq!(names, expected);

        menu.shutdown().await;
    }

    #[tokio::test]
    async fn test_burst_of_writes_is_never_rejected() {
        // Current-thread runtime: the worker cannot run until we yield, so
        // all 200 writes are waiting in the queue at once.
        let menu = setup().await;
        let db = menu.database().clone();

        for i in 0..200 {
            menu.insert(Pizza::new(&format!("Pizza {i}"), "cheese", 100.0, 30).unwrap())
                .unwrap();
        }
        assert_eq!(menu.pending(), 200);

        menu.shutdown().await;

        assert_eq!(db.pizzas().count().await.unwrap(), 200);
        assert_eq!(db.feed().snapshot().len(), 200);
    }

    #[tokio::test]
    async fn test_status_change_through_queue() {
        let menu = setup().await;

        let WriteOutcome::Inserted(mut pizza) =
            menu.insert(margherita()).unwrap().wait().await.unwrap()
        else {
            panic!("expected insert outcome");
        };

        pizza.set_status("preparing").unwrap();
        menu.update(pizza).unwrap().wait().await.unwrap();

        let list = menu.get_all_pizzas().current();
        assert_eq!(list[0].status(), PizzaStatus::Preparing);

        menu.shutdown().await;
    }

    #[tokio::test]
    async fn test_pending_counts_unfinished_writes() {
        let menu = setup().await;
        assert_eq!(menu.pending(), 0);

        let first = menu.insert(margherita()).unwrap();
        let second = menu.insert(margherita()).unwrap();
        assert_eq!(menu.pending(), 2);

        first.wait().await.unwrap();
        second.wait().await.unwrap();
        assert_eq!(menu.pending(), 0);

        menu.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_drains_queued_writes() {
        let menu = setup().await;
        let db = menu.database().clone();

        for i in 0..5 {
            // Tickets dropped on purpose: fire and forget.
            menu.insert(Pizza::new(&format!("Pizza {i}"), "cheese", 100.0, 30).unwrap())
                .unwrap();
        }

        menu.shutdown().await;

        assert_eq!(db.pizzas().count().await.unwrap(), 5);
        assert_eq!(db.feed().snapshot().len(), 5);
    }

    #[tokio::test]
    async fn test_deleting_missing_pizza_is_noop() {
        let menu = setup().await;
        menu.insert(margherita()).unwrap().wait().await.unwrap();

        let outcome = menu
            .delete(margherita().with_id(404))
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Deleted);
        assert_eq!(menu.get_all_pizzas().current().len(), 1);

        menu.shutdown().await;
    }

    #[tokio::test]
    async fn test_storage_failure_reaches_ticket() {
        let menu = setup().await;
        menu.database().close().await;

        let err = menu.insert(margherita()).unwrap().wait().await.unwrap_err();
        assert!(matches!(err, QueueError::Storage(_)));

        menu.shutdown().await;
    }
}
