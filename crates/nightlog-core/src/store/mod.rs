//! Durable storage for sleep nights.
//!
//! # Overview
//!
//! [`NightStore`] is the seam the tracker consumes: a handful of CRUD-style
//! operations over the night table. The production backend is
//! [`SqliteStore`], an embedded SQLite database; tests mostly run it
//! in memory.
//!
//! Implementations must be callable from async context without stalling the
//! runtime, so blocking I/O is the backend's problem to offload.
//!
//! # Errors
//!
//! There is a single error kind. These are local-disk operations with no
//! retry story: if the store cannot be read or written, the environment is
//! broken and the caller surfaces that as a fatal condition.

mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::night::{NewNight, NightId, SleepNight};

#[derive(Error, Debug)]
pub enum StoreError {
    /// Any failure to open, read or write the underlying database.
    #[error("night store unavailable: {0}")]
    Unavailable(String),
}

/// Storage seam for sleep nights - implement for any persistence backend.
#[async_trait]
pub trait NightStore: Send + Sync {
    /// Persist a new night and return it with the assigned identifier.
    async fn insert(&self, night: NewNight) -> Result<SleepNight, StoreError>;

    /// Overwrite the record matching `night.id`. No-op if absent.
    async fn update(&self, night: SleepNight) -> Result<(), StoreError>;

    /// Write the quality rating of the matching record. No-op if absent.
    async fn set_quality(&self, id: NightId, quality: i32) -> Result<(), StoreError>;

    /// Delete all records.
    async fn clear(&self) -> Result<(), StoreError>;

    /// The most recently created record, or `None` if the store is empty.
    async fn get_tonight(&self) -> Result<Option<SleepNight>, StoreError>;

    /// Look up a record by identifier.
    async fn get(&self, id: NightId) -> Result<Option<SleepNight>, StoreError>;

    /// All records, ordered by identifier descending (newest first).
    ///
    /// Every call runs a fresh query; callers re-issue it after mutations
    /// rather than holding a cursor open.
    async fn get_all_nights(&self) -> Result<Vec<SleepNight>, StoreError>;
}
