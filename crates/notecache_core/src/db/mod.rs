//! SQLite bootstrap for the note store.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the note store.
//! - Create the `notes` table and its two secondary indexes.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No note data is read or written before the schema exists.

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_schema, schema_version, SCHEMA_VERSION};
