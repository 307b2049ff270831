//! Core persistence and aggregation for the note cache.
//! This crate is the single source of truth for note record invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod stats;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CoreConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::note::{new_note_id, Note, NoteId, NoteValidationError, Priority};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
pub use stats::{NoteStats, RECENT_WINDOW_MS};
pub use store::memory_store::MemoryNoteStore;
pub use store::sqlite_store::{SqliteNoteStore, StoreLocation};
pub use store::{NoteStore, StoreError, StoreResult};

