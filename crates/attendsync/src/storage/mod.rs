//! Record store implementations.
//!
//! - `inmemory`: the fake attendee web API, a delayed in-memory table used by
//!   tests and the demo binary.
//! - `reconciling`: a decorator that keeps an optimistic, locally consistent
//!   view of writes still in flight against any [`RecordStore`].
//!
//! [`RecordStore`]: attendsync_core::storage::RecordStore

pub mod inmemory;
pub mod reconciling;

pub use inmemory::FakeAttendeeWebApi;
pub use reconciling::{PendingWrite, ReconcilingStore};
