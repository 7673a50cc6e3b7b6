use favlist::db::{FavoriteThing, Store};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

fn temp_db_path(tag: &str) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    SystemTime::now().hash(&mut hasher);
    std::env::temp_dir().join(format!(
        "favlist_{}_{}_{}.sqlite",
        tag,
        std::process::id(),
        hasher.finish()
    ))
}

/// Connects to a fresh temp database and brings it up the same way the
/// binary does: migrations first, then the schema initializer.
async fn fresh_store(tag: &str) -> (Store, PathBuf) {
    let db_path = temp_db_path(tag);
    let database_url = format!("sqlite:{}", db_path.display());
    let store = Store::connect(&database_url)
        .await
        .expect("failed to connect to temp database");
    store.migrate().await.expect("migrations failed");
    store.init_schema().await.expect("schema init failed");
    (store, db_path)
}

fn cleanup(db_path: &Path) {
    let _ = fs::remove_file(format!("{}-wal", db_path.display()));
    let _ = fs::remove_file(format!("{}-shm", db_path.display()));
    let _ = fs::remove_file(db_path);
}

#[tokio::test]
async fn schema_init_is_idempotent() {
    let (store, db_path) = fresh_store("init_idempotent").await;

    // Re-running the initializer must not error and must not touch rows.
    store.init_schema().await.expect("second init failed");

    let id = store.add("Coffee", "Morning fuel").await.unwrap();
    assert!(id > 0, "Expected a valid ID after creation");

    store.init_schema().await.expect("init after insert failed");
    let records = store.list().await.unwrap();
    assert_eq!(records.len(), 1, "Re-init must keep existing rows");
    assert_eq!(records[0].name, "Coffee");

    cleanup(&db_path);
}

#[tokio::test]
async fn add_then_list_returns_newest_first_with_exact_fields() {
    let (store, db_path) = fresh_store("add_list").await;

    // 1. Fresh DB lists empty
    assert!(store.list().await.unwrap().is_empty());

    // 2. Insert two things; names and descriptions are stored verbatim,
    //    including surrounding whitespace.
    let first = store.add("Coffee", "Morning fuel").await.unwrap();
    let second = store.add("  Tea  ", "").await.unwrap();
    assert!(second > first, "ids must be strictly increasing");

    // 3. Newest first, all fields intact
    let records = store.list().await.unwrap();
    assert_eq!(
        records,
        vec![
            FavoriteThing {
                id: second,
                name: "  Tea  ".to_string(),
                description: Some(String::new()),
            },
            FavoriteThing {
                id: first,
                name: "Coffee".to_string(),
                description: Some("Morning fuel".to_string()),
            },
        ]
    );

    cleanup(&db_path);
}

#[tokio::test]
async fn blank_names_are_rejected_without_inserting() {
    let (store, db_path) = fresh_store("blank_name").await;

    let err = store.add("", "whatever").await.unwrap_err();
    assert!(err.is_validation(), "empty name must be a validation error");
    assert_eq!(err.to_string(), "Thing name cannot be empty.");

    let err = store.add("   \t ", "").await.unwrap_err();
    assert!(err.is_validation(), "whitespace-only name must be rejected");

    assert!(
        store.list().await.unwrap().is_empty(),
        "rejected adds must not insert rows"
    );

    cleanup(&db_path);
}

#[tokio::test]
async fn remove_deletes_exactly_one_row() {
    let (store, db_path) = fresh_store("remove").await;

    let first = store.add("One", "").await.unwrap();
    let second = store.add("Two", "").await.unwrap();
    let third = store.add("Three", "").await.unwrap();

    // 1. Removing the middle row affects exactly one row
    let affected = store.remove(second).await.unwrap();
    assert_eq!(affected, 1);

    let ids: Vec<i64> = store.list().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third, first]);

    // 2. Removing the same id again is a no-op, not an error
    let affected = store.remove(second).await.unwrap();
    assert_eq!(affected, 0);

    // 3. Removing an id that never existed is also a no-op
    let affected = store.remove(424_242).await.unwrap();
    assert_eq!(affected, 0);
    assert_eq!(store.list().await.unwrap().len(), 2);

    cleanup(&db_path);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let (store, db_path) = fresh_store("id_reuse").await;

    let first = store.add("Coffee", "").await.unwrap();
    let second = store.add("Tea", "").await.unwrap();

    // Delete the newest row, then insert again: the freed id must not come
    // back.
    store.remove(second).await.unwrap();
    let third = store.add("Mate", "").await.unwrap();
    assert!(
        third > second,
        "ids must keep increasing after a delete (got {third} after deleting {second})"
    );

    let ids: Vec<i64> = store.list().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third, first]);

    cleanup(&db_path);
}

#[tokio::test]
async fn list_is_strictly_descending_by_id() {
    let (store, db_path) = fresh_store("ordering").await;

    for n in 0..5 {
        store.add(&format!("Thing {n}"), "").await.unwrap();
    }

    let records = store.list().await.unwrap();
    assert_eq!(records.len(), 5);
    for pair in records.windows(2) {
        assert!(
            pair[0].id > pair[1].id,
            "Expected strictly descending ids, got {} before {}",
            pair[0].id,
            pair[1].id
        );
    }

    cleanup(&db_path);
}

#[tokio::test]
async fn reset_drops_the_table_until_schema_reinit() {
    let (store, db_path) = fresh_store("reset").await;

    store.add("Coffee", "").await.unwrap();
    store.add("Tea", "").await.unwrap();

    // 1. Reset drops the table entirely
    store.reset().await.expect("reset failed");

    // 2. Every read now fails at the store, not with an empty result
    let err = store.list().await.unwrap_err();
    assert!(
        !err.is_validation(),
        "a missing table must surface as a store error"
    );

    // 3. Re-running the initializer brings back an empty table
    store.init_schema().await.expect("re-init after reset failed");
    assert!(store.list().await.unwrap().is_empty());

    cleanup(&db_path);
}

#[tokio::test]
async fn end_to_end_add_list_remove_scenario() {
    let (store, db_path) = fresh_store("end_to_end").await;

    // 1. Add "Coffee" with a description; first id on a fresh table is 1
    let coffee = store.add("Coffee", "Morning fuel").await.unwrap();
    assert_eq!(coffee, 1);
    let records = store.list().await.unwrap();
    assert_eq!(
        records,
        vec![FavoriteThing {
            id: 1,
            name: "Coffee".to_string(),
            description: Some("Morning fuel".to_string()),
        }]
    );

    // 2. Add "Tea" with an empty description; it lists first
    let tea = store.add("Tea", "").await.unwrap();
    assert_eq!(tea, 2);
    let records = store.list().await.unwrap();
    assert_eq!(
        records,
        vec![
            FavoriteThing {
                id: 2,
                name: "Tea".to_string(),
                description: Some(String::new()),
            },
            FavoriteThing {
                id: 1,
                name: "Coffee".to_string(),
                description: Some("Morning fuel".to_string()),
            },
        ]
    );

    // 3. Remove id 1; only "Tea" remains
    let affected = store.remove(1).await.unwrap();
    assert_eq!(affected, 1);
    let records = store.list().await.unwrap();
    assert_eq!(
        records,
        vec![FavoriteThing {
            id: 2,
            name: "Tea".to_string(),
            description: Some(String::new()),
        }]
    );

    cleanup(&db_path);
}
