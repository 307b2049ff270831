//! SQLite-backed note store.
//!
//! # Responsibility
//! - Persist note records in the `notes` table.
//! - Open the database lazily on first use and reuse that connection.
//! - Run every SQLite call on tokio's blocking pool so a lock wait
//!   suspends only the caller.
//!
//! # Invariants
//! - Schema creation completes before any CRUD statement runs; callers
//!   that arrive during initialization wait for it.
//! - At most one statement runs on the connection at a time.

use crate::db::{open_db, open_db_in_memory};
use crate::model::note::{Note, Priority};
use crate::store::{ensure_id_present, NoteStore, StoreError, StoreResult};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tokio::task::{spawn_blocking, JoinError};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    priority,
    timestamp,
    updated_at
FROM notes";

type SharedConnection = Arc<Mutex<Connection>>;

/// Where the store keeps its database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// SQLite-backed note store with lazy, shared connection bootstrap.
pub struct SqliteNoteStore {
    location: StoreLocation,
    conn: OnceCell<SharedConnection>,
}

impl SqliteNoteStore {
    /// Creates a store for `location` without touching the database yet.
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            conn: OnceCell::new(),
        }
    }

    /// Creates a store backed by the SQLite file at `path`.
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreLocation::File(path.into()))
    }

    /// Creates a store backed by a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(StoreLocation::Memory)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Returns whether the connection has been opened and its schema ensured.
    pub fn is_open(&self) -> bool {
        self.conn.initialized()
    }

    async fn shared_connection(&self) -> StoreResult<SharedConnection> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let location = self.location.clone();
                let conn = spawn_blocking(move || match location {
                    StoreLocation::File(path) => open_db(path),
                    StoreLocation::Memory => open_db_in_memory(),
                })
                .await
                .map_err(worker_failed)??;
                Ok::<_, StoreError>(Arc::new(Mutex::new(conn)))
            })
            .await?;
        Ok(Arc::clone(conn))
    }

    /// Runs `op` against the connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = self.shared_connection().await?;
        spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))?;
            op(&guard)
        })
        .await
        .map_err(worker_failed)?
    }
}

fn worker_failed(err: JoinError) -> StoreError {
    StoreError::Unavailable(format!("blocking sqlite task failed: {err}"))
}

impl NoteStore for SqliteNoteStore {
    async fn put(&self, note: &Note) -> StoreResult<()> {
        ensure_id_present(note)?;
        let note = note.clone();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO notes (
                    id,
                    title,
                    content,
                    priority,
                    timestamp,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    content = excluded.content,
                    priority = excluded.priority,
                    timestamp = excluded.timestamp,
                    updated_at = excluded.updated_at;",
                params![
                    note.id,
                    note.title,
                    note.content,
                    note.priority.as_str(),
                    note.timestamp,
                    note.updated_at,
                ],
            )?;
            debug!("event=store_put module=store status=ok note_id={}", note.id);
            Ok(())
        })
        .await
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Note>> {
        let id = id.to_string();
        self.run(move |conn| {
            let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id.as_str()])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_note_row(row)?));
            }

            Ok(None)
        })
        .await
    }

    async fn get_all(&self) -> StoreResult<Vec<Note>> {
        self.run(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{NOTE_SELECT_SQL} ORDER BY timestamp DESC, id ASC;"
            ))?;
            let mut rows = stmt.query([])?;
            let mut notes = Vec::new();
            while let Some(row) = rows.next()? {
                notes.push(parse_note_row(row)?);
            }
            Ok(notes)
        })
        .await
    }

    async fn get_by_priority(&self, priority: Priority) -> StoreResult<Vec<Note>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{NOTE_SELECT_SQL} WHERE priority = ?1 ORDER BY timestamp DESC, id ASC;"
            ))?;
            let mut rows = stmt.query([priority.as_str()])?;
            let mut notes = Vec::new();
            while let Some(row) = rows.next()? {
                notes.push(parse_note_row(row)?);
            }
            Ok(notes)
        })
        .await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();
        self.run(move |conn| {
            let removed = conn.execute("DELETE FROM notes WHERE id = ?1;", [id.as_str()])?;
            debug!(
                "event=store_delete module=store status=ok note_id={} removed={}",
                id, removed
            );
            Ok(())
        })
        .await
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let id: String = row.get("id")?;
    let priority_text: String = row.get("priority")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid priority `{priority_text}` in notes.priority for `{id}`"
        ))
    })?;

    Ok(Note {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        priority,
        timestamp: row.get("timestamp")?,
        updated_at: row.get("updated_at")?,
    })
}
