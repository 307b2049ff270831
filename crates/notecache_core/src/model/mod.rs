//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is immediate; there are no tombstones or versions.

pub mod note;
