//! Entry Record Store — persistence of [`MoodEntry`] rows.
//!
//! The service layer only sees the [`EntryStore`] trait. Postgres is the
//! system of record; the memory store backs local runs without a database
//! and the test suite.

use async_trait::async_trait;

use crate::models::entry::{DateRange, MoodEntry, NewMoodEntry};

mod memory;
mod postgres;

pub use memory::MemoryEntryStore;
pub use postgres::PgEntryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (pool exhausted, connection refused, ...).
    #[error("entry store unavailable: {0}")]
    Unavailable(String),

    /// The store was reached but refused the statement.
    #[error("entry store rejected the operation: {0}")]
    Rejected(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Rejected(err.to_string()),
        }
    }
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Persist one entry and return the stored row.
    async fn insert(&self, entry: NewMoodEntry) -> Result<MoodEntry, StoreError>;

    /// Entries owned by `user_id` whose date falls in `range`, oldest first.
    async fn list_by_user(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<MoodEntry>, StoreError>;

    /// Cheap reachability check used by `/readyz`.
    async fn ping(&self) -> Result<(), StoreError>;
}
