use std::collections::BTreeMap;

use crate::record::Record;

use super::{SlotHandle, SlotStatus};

#[derive(Debug, Clone)]
struct Slot<R> {
    record: R,
    status: SlotStatus,
}

/// Insertion-ordered arena of records known to a reconciling store.
///
/// Slots are keyed by monotonically increasing handles, so iterating the map
/// yields insertion order and removing a slot leaves no gap behind.
#[derive(Debug, Clone)]
pub struct PendingSet<R> {
    slots: BTreeMap<SlotHandle, Slot<R>>,
    next_handle: u64,
}

impl<R> Default for PendingSet<R> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
            next_handle: 0,
        }
    }
}

impl<R: Record> PendingSet<R> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pending slot holding `record` and returns its handle.
    pub fn insert(&mut self, record: R) -> SlotHandle {
        self.next_handle += 1;
        let handle = SlotHandle::new(self.next_handle);
        self.slots.insert(
            handle,
            Slot {
                record,
                status: SlotStatus::Pending,
            },
        );
        handle
    }

    /// Replaces a pending slot's record with the store's copy and marks it
    /// confirmed. Returns the record it replaced.
    ///
    /// Returns `None` without touching anything if the slot is gone or was
    /// already confirmed.
    pub fn reconcile(&mut self, handle: SlotHandle, confirmed: R) -> Option<R> {
        let slot = self.slots.get_mut(&handle)?;
        if !slot.status.is_pending() {
            return None;
        }
        slot.status = SlotStatus::Confirmed;
        Some(std::mem::replace(&mut slot.record, confirmed))
    }

    /// Removes a slot entirely.
    pub fn discard(&mut self, handle: SlotHandle) -> Option<R> {
        self.slots.remove(&handle).map(|slot| slot.record)
    }

    /// Returns a copy of the record currently held by a slot.
    pub fn get(&self, handle: SlotHandle) -> Option<R> {
        self.slots.get(&handle).map(|slot| slot.record.duplicate())
    }

    pub fn status(&self, handle: SlotHandle) -> Option<SlotStatus> {
        self.slots.get(&handle).map(|slot| slot.status)
    }

    /// Copies every record in insertion order.
    pub fn snapshot(&self) -> Vec<R> {
        self.slots
            .values()
            .map(|slot| slot.record.duplicate())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots still waiting on the store.
    pub fn pending_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.status.is_pending())
            .count()
    }
}
