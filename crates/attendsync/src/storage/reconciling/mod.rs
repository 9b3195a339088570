//! Reconciling write-through decorator.
//!
//! Wraps a [`RecordStore`](attendsync_core::storage::RecordStore) so callers can
//! read a locally consistent view while writes are still in flight:
//!
//! - **Writes**: the record becomes visible immediately (identity absent), the
//!   store write runs in the background, and its outcome either reveals the
//!   assigned identity in place or removes the record.
//! - **Reads**: the store listing is awaited as a liveness probe; the answer
//!   comes from the Pending Set as it stands when the probe resolves.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let api = Arc::new(FakeAttendeeWebApi::new());
//! let store = ReconcilingStore::new(api);
//!
//! let write = store.post(&Attendee::new("Ada", "Lovelace"));
//! assert_eq!(store.get_all().await?[0].attendee_id, None);
//!
//! let confirmed = write.await?;
//! assert_eq!(store.get_all().await?[0].attendee_id, confirmed.attendee_id);
//! ```

mod store;
mod write;

pub use store::ReconcilingStore;
pub use write::PendingWrite;
