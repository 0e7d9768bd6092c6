use hana_core::db::migrations::latest_version;
use hana_core::db::{open_db, open_db_in_memory, DbError};
use hana_core::{KvPoemRepository, PoemRecord, PoemRepository, SqliteKeyValueStore};
use rusqlite::Connection;

#[test]
fn in_memory_open_creates_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn collection_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hana.sqlite3");

    let first = open_db(&path).unwrap();
    KvPoemRepository::new(SqliteKeyValueStore::new(&first))
        .save(&[PoemRecord::with_id("kept", "Ann", "still here", 64)])
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let loaded = KvPoemRepository::new(SqliteKeyValueStore::new(&second)).load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].score, 64);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
