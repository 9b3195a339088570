use std::fmt;

use crate::storage::StoreError;

/// Stable address of a slot in a [`PendingSet`](super::PendingSet).
///
/// Handles are never reused, so a handle for a discarded slot simply stops
/// resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotHandle(u64);

impl SlotHandle {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SlotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot-{}", self.0)
    }
}

/// Lifecycle state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Submitted; the store has not confirmed the write yet.
    Pending,
    /// The store confirmed the write and assigned an identity.
    Confirmed,
}

impl SlotStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, SlotStatus::Pending)
    }
}

/// Change notifications emitted while slots move through their lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileEvent<R> {
    Submitted { handle: SlotHandle, record: R },
    Confirmed { handle: SlotHandle, record: R },
    Discarded { handle: SlotHandle, error: StoreError },
}

impl<R> ReconcileEvent<R> {
    /// Returns the handle of the slot this event refers to.
    pub fn handle(&self) -> SlotHandle {
        match self {
            ReconcileEvent::Submitted { handle, .. }
            | ReconcileEvent::Confirmed { handle, .. }
            | ReconcileEvent::Discarded { handle, .. } => *handle,
        }
    }

    /// Returns the event name for logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            ReconcileEvent::Submitted { .. } => "submitted",
            ReconcileEvent::Confirmed { .. } => "confirmed",
            ReconcileEvent::Discarded { .. } => "discarded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_handle_display() {
        assert_eq!(SlotHandle::new(12).to_string(), "slot-12");
    }

    #[test]
    fn test_event_handle_and_type() {
        let event: ReconcileEvent<()> = ReconcileEvent::Discarded {
            handle: SlotHandle::new(3),
            error: StoreError::WriteFailed("boom".to_string()),
        };

        assert_eq!(event.handle(), SlotHandle::new(3));
        assert_eq!(event.event_type(), "discarded");
    }
}
