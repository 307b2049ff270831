//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/update/remove/get/list/stats entry points for callers.
//! - Assign identity and timestamps that the raw store does not assign.
//! - Enforce record shape rules before persistence.
//!
//! # Invariants
//! - `update` never changes `id` or `timestamp` and never creates a record.
//! - `updated_at` is never earlier than `timestamp`.
//! - Logs carry ids and counts only, never titles or content.

use crate::clock::{Clock, SystemClock};
use crate::model::note::{Note, NoteId, NoteValidationError, Priority};
use crate::stats::NoteStats;
use crate::store::{NoteStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Input violates note shape rules; the user can correct and retry.
    Validation(NoteValidationError),
    /// Operation referenced an id with no stored record.
    NotFound(NoteId),
    /// Underlying store failed; the operation was abandoned.
    Storage(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over an injected store and clock.
pub struct NoteService<S: NoteStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: NoteStore> NoteService<S, SystemClock> {
    /// Creates a service reading time from the wall clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: NoteStore, C: Clock> NoteService<S, C> {
    /// Creates a service with an explicit time source.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a note with a fresh id and the current time as `timestamp`.
    ///
    /// # Errors
    /// - `Validation(EmptyTitle)` when `title` is blank after trimming.
    /// - `Storage` when the store rejects the write.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        priority: Priority,
    ) -> NoteServiceResult<Note> {
        let started_at = Instant::now();
        let title = normalize_title(title)?;
        let note = Note::new(title, content, priority, self.clock.now_ms());
        note.validate()?;

        if let Err(err) = self.store.put(&note).await {
            warn!(
                "event=note_create module=service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=note_create module=service status=ok note_id={} priority={} duration_ms={}",
            note.id,
            note.priority,
            started_at.elapsed().as_millis()
        );
        Ok(note)
    }

    /// Replaces title, content and priority of an existing note.
    ///
    /// Reads then writes without a spanning transaction; a concurrent write
    /// to the same id between the two steps is not detected.
    ///
    /// # Errors
    /// - `NotFound` when no record with `id` exists, checked before the title; the store is untouched.
    /// - `Validation(EmptyTitle)` when `title` is blank after trimming.
    /// - `Storage` when the store fails.
    pub async fn update(
        &self,
        id: &str,
        title: &str,
        content: &str,
        priority: Priority,
    ) -> NoteServiceResult<Note> {
        let started_at = Instant::now();
        let Some(existing) = self.store.get(id).await? else {
            info!("event=note_update module=service status=not_found note_id={id}");
            return Err(NoteServiceError::NotFound(id.to_string()));
        };
        let title = normalize_title(title)?;

        let note = Note {
            title,
            content: content.to_string(),
            priority,
            updated_at: Some(self.clock.now_ms().max(existing.timestamp)),
            ..existing
        };
        note.validate()?;

        if let Err(err) = self.store.put(&note).await {
            warn!(
                "event=note_update module=service status=error note_id={} duration_ms={} error={}",
                id,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=note_update module=service status=ok note_id={} priority={} duration_ms={}",
            note.id,
            note.priority,
            started_at.elapsed().as_millis()
        );
        Ok(note)
    }

    /// Deletes a note; removing a missing id succeeds.
    pub async fn remove(&self, id: &str) -> NoteServiceResult<()> {
        self.store.delete(id).await?;
        info!("event=note_remove module=service status=ok note_id={id}");
        Ok(())
    }

    /// Gets one note by id.
    pub async fn get(&self, id: &str) -> NoteServiceResult<Option<Note>> {
        Ok(self.store.get(id).await?)
    }

    /// Lists all notes, most recent `timestamp` first.
    pub async fn list(&self) -> NoteServiceResult<Vec<Note>> {
        Ok(self.store.get_all().await?)
    }

    /// Lists notes in one priority bucket, most recent first.
    pub async fn list_by_priority(&self, priority: Priority) -> NoteServiceResult<Vec<Note>> {
        Ok(self.store.get_by_priority(priority).await?)
    }

    /// Aggregates counts over a full scan of `list()` at the current time.
    pub async fn stats(&self) -> NoteServiceResult<NoteStats> {
        let notes = self.list().await?;
        let stats = NoteStats::from_notes(&notes, self.clock.now_ms());
        info!(
            "event=note_stats module=service status=ok total={} recent_week={}",
            stats.total, stats.recent_week
        );
        Ok(stats)
    }
}

fn normalize_title(title: &str) -> Result<String, NoteValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
