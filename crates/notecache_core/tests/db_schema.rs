use notecache_core::db::{open_db, open_db_in_memory, schema_version, SCHEMA_VERSION};
use notecache_core::StoreError;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_notes_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    assert_sqlite_object_exists(&conn, "table", "notes");
    assert_sqlite_object_exists(&conn, "index", "idx_notes_timestamp");
    assert_sqlite_object_exists(&conn, "index", "idx_notes_priority");
}

#[test]
fn reopening_file_keeps_rows_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notecache.db");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO notes (id, title, content, priority, timestamp)
             VALUES ('kept', 'title', '', 'low', 1);",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second).unwrap(), SCHEMA_VERSION);
    let rows: i64 = second
        .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        StoreError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_rejects_unknown_priority_values() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO notes (id, title, content, priority, timestamp)
         VALUES ('x', 'title', '', 'urgent', 1);",
        [],
    );
    assert!(result.is_err());
}

fn assert_sqlite_object_exists(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
