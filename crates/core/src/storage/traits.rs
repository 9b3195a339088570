use async_trait::async_trait;

use crate::record::Record;

use super::Result;

/// An asynchronous, possibly failing store of records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The record type held by this store.
    type Record: Record;

    /// Persists a new record and resolves with the canonical copy carrying the
    /// assigned identity. Must not mutate `record`.
    async fn post(&self, record: &Self::Record) -> Result<Self::Record>;

    /// Returns copies of every persisted record.
    async fn get_all(&self) -> Result<Vec<Self::Record>>;
}
