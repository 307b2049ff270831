//! Record store contracts and implementations.
//!
//! # Responsibility
//! - Define the durable keyed storage contract for note records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - `put` inserts or fully replaces the record with the same id.
//! - `get` reports a missing id as `Ok(None)`, never as an error.
//! - `delete` of a missing id is a successful no-op.
//! - `get_all` is ordered by `timestamp DESC`, ties broken by `id ASC`.

use crate::model::note::{Note, NoteValidationError, Priority};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub mod memory_store;
pub mod sqlite_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-level failure.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite rejected the open, the schema bootstrap, or a statement.
    Sqlite(rusqlite::Error),
    /// The database was written by a newer schema than this build knows.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// The blocking worker running a statement died or left the
    /// connection unusable.
    Unavailable(String),
    /// Stored or supplied data violates the record shape.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "notes schema version {found} is newer than supported {supported}"
            ),
            Self::Unavailable(message) => write!(f, "note store unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid note data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Durable keyed storage for note records.
///
/// Every operation is a suspension point; callers await each call before
/// issuing the next one. Each call is atomic on its own; multi-call
/// sequences are not.
#[allow(async_fn_in_trait)]
pub trait NoteStore {
    /// Inserts or fully replaces the record with matching id.
    async fn put(&self, note: &Note) -> StoreResult<()>;
    /// Gets one record by id.
    async fn get(&self, id: &str) -> StoreResult<Option<Note>>;
    /// Returns every record, most recent `timestamp` first.
    async fn get_all(&self) -> StoreResult<Vec<Note>>;
    /// Returns records in one priority bucket, ordered like `get_all`.
    async fn get_by_priority(&self, priority: Priority) -> StoreResult<Vec<Note>>;
    /// Removes the record for id if present.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

impl<S: NoteStore> NoteStore for Arc<S> {
    async fn put(&self, note: &Note) -> StoreResult<()> {
        (**self).put(note).await
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Note>> {
        (**self).get(id).await
    }

    async fn get_all(&self) -> StoreResult<Vec<Note>> {
        (**self).get_all().await
    }

    async fn get_by_priority(&self, priority: Priority) -> StoreResult<Vec<Note>> {
        (**self).get_by_priority(priority).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        (**self).delete(id).await
    }
}

/// Sorts records newest first with a stable id tie-break.
pub(crate) fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
}

pub(crate) fn ensure_id_present(note: &Note) -> StoreResult<()> {
    if note.id.trim().is_empty() {
        return Err(StoreError::InvalidData(
            "note id must be assigned before put".to_string(),
        ));
    }
    Ok(())
}
