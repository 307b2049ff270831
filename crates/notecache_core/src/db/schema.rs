//! `notes` schema creation.

use crate::store::{StoreError, StoreResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const NOTES_SCHEMA_SQL: &str = include_str!("notes_schema.sql");

/// Reads `PRAGMA user_version`; `0` means the schema was never created.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Creates the notes table and indexes when absent.
///
/// Returns `true` when this call created the schema. The version is
/// re-read inside an immediate transaction, so two processes opening the
/// same blank file create it once.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file carries a newer version.
pub fn ensure_schema(conn: &mut Connection) -> StoreResult<bool> {
    if schema_version(conn)? == SCHEMA_VERSION {
        return Ok(false);
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let created = match schema_version(&tx)? {
        0 => {
            tx.execute_batch(NOTES_SCHEMA_SQL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            true
        }
        SCHEMA_VERSION => false,
        found => {
            return Err(StoreError::UnsupportedSchemaVersion {
                found,
                supported: SCHEMA_VERSION,
            })
        }
    };
    tx.commit()?;

    if created {
        info!("event=db_schema module=db status=created version={SCHEMA_VERSION}");
    }
    Ok(created)
}
