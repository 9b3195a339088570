//! Reconciling store decorator.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::broadcast;

use attendsync_core::reconcile::{PendingSet, ReconcileEvent, SlotHandle, SlotStatus};
use attendsync_core::storage::{RecordStore, Result, StoreError};
use attendsync_core::Record;

use super::PendingWrite;

/// Channel capacity for reconciliation events.
const EVENT_CAPACITY: usize = 100;

/// Pending Set plus its event channel, shared with in-flight write tasks.
struct Shared<R: Record> {
    pending: Mutex<PendingSet<R>>,
    events: broadcast::Sender<ReconcileEvent<R>>,
}

impl<R: Record> Shared<R> {
    fn pending(&self) -> MutexGuard<'_, PendingSet<R>> {
        // Every mutation is a single call on the set, so a poisoned lock still
        // guards a consistent value.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn submit(&self, record: R) -> SlotHandle {
        let handle = self.pending().insert(record.duplicate());
        tracing::debug!(slot = %handle, "Record submitted");

        // No receivers is fine, nobody is listening.
        let _ = self.events.send(ReconcileEvent::Submitted { handle, record });
        handle
    }

    fn confirm(&self, handle: SlotHandle, confirmed: R) {
        if !confirmed.has_id() {
            tracing::warn!(slot = %handle, "Store confirmed a write without assigning an identity");
        }

        if self
            .pending()
            .reconcile(handle, confirmed.duplicate())
            .is_none()
        {
            tracing::warn!(slot = %handle, "Slot was no longer pending at confirmation");
            return;
        }

        match confirmed.id() {
            Some(id) => tracing::debug!(slot = %handle, record_id = %id, "Record confirmed"),
            None => tracing::debug!(slot = %handle, "Record confirmed"),
        }
        let _ = self.events.send(ReconcileEvent::Confirmed {
            handle,
            record: confirmed,
        });
    }

    fn discard(&self, handle: SlotHandle, error: StoreError) {
        self.pending().discard(handle);
        tracing::warn!(slot = %handle, error = %error, "Write failed, record discarded");
        let _ = self.events.send(ReconcileEvent::Discarded { handle, error });
    }
}

/// Discards its slot on drop unless the write settled first.
///
/// Created before the write task is spawned, so a task dropped by runtime
/// shutdown before its first poll still releases the slot, as does a store that
/// panics mid-write.
struct SlotGuard<R: Record> {
    shared: Arc<Shared<R>>,
    handle: SlotHandle,
    settled: bool,
}

impl<R: Record> SlotGuard<R> {
    fn new(shared: Arc<Shared<R>>, handle: SlotHandle) -> Self {
        Self {
            shared,
            handle,
            settled: false,
        }
    }

    fn confirm(mut self, confirmed: R) {
        self.settled = true;
        self.shared.confirm(self.handle, confirmed);
    }

    fn fail(mut self, error: StoreError) {
        self.settled = true;
        self.shared.discard(self.handle, error);
    }
}

impl<R: Record> Drop for SlotGuard<R> {
    fn drop(&mut self) {
        if !self.settled {
            self.shared.discard(
                self.handle,
                StoreError::Aborted("write did not complete".to_string()),
            );
        }
    }
}

/// Reconciling write-through decorator over a [`RecordStore`].
///
/// Keeps an insertion-ordered Pending Set of every record posted through it.
/// The Pending Set, not the underlying store's listing, is what `get_all`
/// returns. Clones share the same Pending Set.
///
/// `post` spawns onto the current Tokio runtime and must be called from
/// within one.
///
/// # Type Parameters
///
/// * `S` - The underlying record store
pub struct ReconcilingStore<S: RecordStore> {
    store: Arc<S>,
    shared: Arc<Shared<S::Record>>,
}

impl<S: RecordStore> Clone for ReconcilingStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S> ReconcilingStore<S>
where
    S: RecordStore + 'static,
{
    /// Creates a decorator over `store` with an empty Pending Set.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_event_capacity(store, EVENT_CAPACITY)
    }

    /// Creates a decorator whose event channel buffers `capacity` events per
    /// subscriber (at least one).
    pub fn with_event_capacity(store: Arc<S>, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            store,
            shared: Arc::new(Shared {
                pending: Mutex::new(PendingSet::new()),
                events,
            }),
        }
    }

    /// Submits `record` for creation.
    ///
    /// A copy is appended to the Pending Set before this returns, so any
    /// `get_all` issued afterwards includes it. The store write runs in the
    /// background; the returned [`PendingWrite`] resolves with its outcome.
    pub fn post(&self, record: &S::Record) -> PendingWrite<S::Record> {
        let outgoing = record.duplicate();
        if let Some(id) = outgoing.id() {
            tracing::debug!(record_id = %id, "Posting a record that already carries an identity");
        }

        let handle = self.shared.submit(outgoing.duplicate());
        let store = Arc::clone(&self.store);
        let guard = SlotGuard::new(Arc::clone(&self.shared), handle);

        let task = tokio::spawn(async move {
            match store.post(&outgoing).await {
                Ok(confirmed) => {
                    guard.confirm(confirmed.duplicate());
                    Ok(confirmed)
                }
                Err(err) => {
                    guard.fail(err.clone());
                    Err(err)
                }
            }
        });

        PendingWrite::new(handle, task)
    }

    /// Lists every record in the Pending Set, in insertion order.
    ///
    /// The underlying listing only has to succeed; its contents are ignored.
    /// The Pending Set is read after it resolves, so writes that settled in the
    /// meantime are reflected.
    pub async fn get_all(&self) -> Result<Vec<S::Record>> {
        let listed = self.store.get_all().await?;
        let records = self.shared.pending().snapshot();

        tracing::trace!(
            store_count = listed.len(),
            count = records.len(),
            "Listed records"
        );
        Ok(records)
    }

    /// Returns the latest copy of the record in a slot, if it is still there.
    pub fn lookup(&self, handle: SlotHandle) -> Option<S::Record> {
        self.shared.pending().get(handle)
    }

    pub fn status(&self, handle: SlotHandle) -> Option<SlotStatus> {
        self.shared.pending().status(handle)
    }

    /// Number of records in the Pending Set.
    pub fn len(&self) -> usize {
        self.shared.pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.pending().is_empty()
    }

    /// Number of writes still waiting on the store.
    pub fn pending_count(&self) -> usize {
        self.shared.pending().pending_count()
    }

    /// Subscribes to slot lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<ReconcileEvent<S::Record>> {
        self.shared.events.subscribe()
    }
}

#[async_trait]
impl<S> RecordStore for ReconcilingStore<S>
where
    S: RecordStore + 'static,
{
    type Record = S::Record;

    async fn post(&self, record: &S::Record) -> Result<S::Record> {
        ReconcilingStore::post(self, record).await
    }

    async fn get_all(&self) -> Result<Vec<S::Record>> {
        ReconcilingStore::get_all(self).await
    }
}
