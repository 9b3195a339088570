//! attendsync - Optimistic client layer over the conference attendee web API.

pub mod config;
pub mod storage;

pub use config::Config;
pub use storage::{FakeAttendeeWebApi, PendingWrite, ReconcilingStore};
