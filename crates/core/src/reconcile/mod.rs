//! Pending Set bookkeeping for optimistic writes.
//!
//! A record enters the set the moment its creation is submitted and leaves it
//! only if the write fails. A successful write reconciles the slot in place,
//! revealing the store-assigned identity without moving the record.

mod pending;
mod types;

pub use pending::PendingSet;
pub use types::{ReconcileEvent, SlotHandle, SlotStatus};
