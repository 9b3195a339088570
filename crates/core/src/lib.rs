//! attendsync_core - Pure types and logic for attendsync.
//!
//! Nothing in this crate performs I/O or spawns tasks. The async shell lives
//! in the `attendsync` crate.

pub mod attendee;
pub mod reconcile;
pub mod record;
pub mod storage;

pub use record::Record;
