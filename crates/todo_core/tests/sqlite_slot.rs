use rusqlite::Connection;
use std::path::Path;
use todo_core::kv::SLOT_SCHEMA_VERSION;
use todo_core::{KeyValueStore, KvError, KvTodoRepository, SqliteKvStore, TodoStore};

#[test]
fn fresh_file_gets_slot_table_and_layout_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");

    drop(SqliteKvStore::open(&path).unwrap());

    let conn = Connection::open(&path).unwrap();
    assert_eq!(user_version(&conn), SLOT_SCHEMA_VERSION);
    assert!(table_exists(&conn, "kv_entries"));
}

#[test]
fn slot_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");

    SqliteKvStore::open(&path)
        .unwrap()
        .set("todos", r#"[{"x":1}]"#)
        .unwrap();

    let reopened = SqliteKvStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("todos").unwrap().as_deref(),
        Some(r#"[{"x":1}]"#)
    );
    assert_eq!(reopened.get("other").unwrap(), None);
}

#[test]
fn newer_layout_is_rejected_without_touching_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    write_raw(&path, "PRAGMA user_version = 999;");

    match SqliteKvStore::open(&path) {
        Err(KvError::UnsupportedSchema { found, supported }) => {
            assert_eq!(found, 999);
            assert_eq!(supported, SLOT_SCHEMA_VERSION);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer layout must be rejected"),
    }

    let conn = Connection::open(&path).unwrap();
    assert!(!table_exists(&conn, "kv_entries"));
    assert_eq!(user_version(&conn), 999);
}

#[test]
fn foreign_database_gains_slot_and_keeps_its_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.sqlite3");
    write_raw(
        &path,
        "CREATE TABLE notes (body TEXT NOT NULL);
         INSERT INTO notes (body) VALUES ('keep me');",
    );

    SqliteKvStore::open(&path)
        .unwrap()
        .set("todos", "[]")
        .unwrap();

    let conn = Connection::open(&path).unwrap();
    let body: String = conn
        .query_row("SELECT body FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(body, "keep me");
    assert!(table_exists(&conn, "kv_entries"));
}

#[test]
fn current_layout_with_missing_table_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("damaged.sqlite3");
    write_raw(&path, &format!("PRAGMA user_version = {SLOT_SCHEMA_VERSION};"));

    let slot = SqliteKvStore::open(&path).unwrap();
    slot.set("todos", "[]").unwrap();
    assert_eq!(slot.get("todos").unwrap().as_deref(), Some("[]"));
}

#[test]
fn todo_collection_is_stored_as_one_json_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");
    {
        let slot = SqliteKvStore::open(&path).unwrap();
        let mut store = TodoStore::load(KvTodoRepository::new(slot));
        store.add("Buy milk");
        store.add("Walk dog");
    }

    let conn = Connection::open(&path).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    let raw: String = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = 'todos';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    let titles: Vec<&str> = records
        .iter()
        .map(|record| record["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Buy milk", "Walk dog"]);
}

fn write_raw(path: &Path, sql: &str) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(sql).unwrap();
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        == 1
}
