//! Fake attendee web API.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use attendsync_core::attendee::Attendee;
use attendsync_core::storage::{RecordStore, Result, StoreError};
use attendsync_core::Record;

use crate::config::Config;

const DEFAULT_POST_DELAY: Duration = Duration::from_millis(5);
const DEFAULT_GET_ALL_DELAY: Duration = Duration::from_millis(1);

/// In-memory stand-in for the attendee web API.
///
/// Behaves like the real service from the caller's point of view: every call
/// resolves on a later tick, `post` assigns the primary key, and `get_all`
/// answers faster than `post`. Data lives in an `Arc<RwLock<_>>` table and is
/// lost when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct FakeAttendeeWebApi {
    attendees: Arc<RwLock<Vec<Attendee>>>,
    post_failures: Arc<Mutex<VecDeque<StoreError>>>,
    post_rejections: Arc<Mutex<HashMap<String, StoreError>>>,
    get_all_failures: Arc<Mutex<VecDeque<StoreError>>>,
    post_delay: Duration,
    get_all_delay: Duration,
}

impl Default for FakeAttendeeWebApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeAttendeeWebApi {
    /// Creates an empty web API with the default latencies (5ms post, 1ms get_all).
    pub fn new() -> Self {
        Self::with_delays(DEFAULT_POST_DELAY, DEFAULT_GET_ALL_DELAY)
    }

    /// Creates an empty web API with custom latencies.
    pub fn with_delays(post_delay: Duration, get_all_delay: Duration) -> Self {
        Self {
            attendees: Arc::new(RwLock::new(Vec::new())),
            post_failures: Arc::new(Mutex::new(VecDeque::new())),
            post_rejections: Arc::new(Mutex::new(HashMap::new())),
            get_all_failures: Arc::new(Mutex::new(VecDeque::new())),
            post_delay,
            get_all_delay,
        }
    }

    /// Creates an empty web API using the latencies from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_delays(config.post_delay(), config.get_all_delay())
    }

    /// Makes the next `post` call fail with `error` once its delay elapses.
    ///
    /// Queued failures are claimed in call order, when the call starts.
    pub async fn fail_next_post(&self, error: StoreError) {
        self.post_failures.lock().await.push_back(error);
    }

    /// Makes the next `post` of the attendee named `full_name` fail with `error`.
    ///
    /// Takes precedence over failures queued with [`fail_next_post`](Self::fail_next_post).
    pub async fn fail_post_for(&self, full_name: impl Into<String>, error: StoreError) {
        self.post_rejections
            .lock()
            .await
            .insert(full_name.into(), error);
    }

    /// Makes the next `get_all` call fail with `error` once its delay elapses.
    pub async fn fail_next_get_all(&self, error: StoreError) {
        self.get_all_failures.lock().await.push_back(error);
    }

    /// Number of attendees persisted so far.
    pub async fn len(&self) -> usize {
        self.attendees.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.attendees.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for FakeAttendeeWebApi {
    type Record = Attendee;

    async fn post(&self, attendee: &Attendee) -> Result<Attendee> {
        let rejection = self
            .post_rejections
            .lock()
            .await
            .remove(&attendee.full_name());
        let failure = match rejection {
            Some(error) => Some(error),
            None => self.post_failures.lock().await.pop_front(),
        };
        tokio::time::sleep(self.post_delay).await;

        if let Some(error) = failure {
            tracing::trace!(error = %error, "Fake web API rejecting post");
            return Err(error);
        }

        let mut attendees = self.attendees.write().await;
        let id = attendees.len() as u64 + 1;
        let stored = attendee.duplicate().with_id(id);
        attendees.push(stored.duplicate());

        tracing::trace!(attendee_id = id, "Fake web API stored attendee");
        Ok(stored)
    }

    async fn get_all(&self) -> Result<Vec<Attendee>> {
        let failure = self.get_all_failures.lock().await.pop_front();
        tokio::time::sleep(self.get_all_delay).await;

        if let Some(error) = failure {
            tracing::trace!(error = %error, "Fake web API rejecting get_all");
            return Err(error);
        }

        let attendees = self.attendees.read().await;
        Ok(attendees.iter().map(Record::duplicate).collect())
    }
}
