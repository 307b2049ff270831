//! In-memory note store.
//!
//! Same contract as the SQLite store without durability. Used to inject a
//! fake store into services and for short-lived sessions.

use crate::model::note::{Note, NoteId, Priority};
use crate::store::{ensure_id_present, sort_newest_first, NoteStore, StoreResult};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// Note store holding records in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<BTreeMap<NoteId, Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `notes`; later ids win on collision.
    pub fn with_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        let notes = notes
            .into_iter()
            .map(|note| (note.id.clone(), note))
            .collect();
        Self {
            notes: Mutex::new(notes),
        }
    }
}

impl NoteStore for MemoryNoteStore {
    async fn put(&self, note: &Note) -> StoreResult<()> {
        ensure_id_present(note)?;
        self.notes.lock().await.insert(note.id.clone(), note.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Note>> {
        Ok(self.notes.lock().await.get(id).cloned())
    }

    async fn get_all(&self) -> StoreResult<Vec<Note>> {
        let mut notes: Vec<Note> = self.notes.lock().await.values().cloned().collect();
        sort_newest_first(&mut notes);
        Ok(notes)
    }

    async fn get_by_priority(&self, priority: Priority) -> StoreResult<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .notes
            .lock()
            .await
            .values()
            .filter(|note| note.priority == priority)
            .cloned()
            .collect();
        sort_newest_first(&mut notes);
        Ok(notes)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.notes.lock().await.remove(id);
        Ok(())
    }
}
