use std::sync::Arc;

use logos_core::model::{ProgressMap, WordId};
use logos_core::time::fixed_now;
use storage::sqlite::SqliteRepository;
use storage::{KeyValueStore, KvProgressRepository, PROGRESS_KEY, ProgressRepository, Storage};

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_kv_roundtrip_and_overwrite() {
    let repo = connect("memdb_kv_roundtrip").await;

    assert_eq!(repo.get("missing").await.unwrap(), None);

    repo.put("greeting", "χαῖρε").await.unwrap();
    repo.put("greeting", "shalom").await.unwrap();
    assert_eq!(repo.get("greeting").await.unwrap().as_deref(), Some("shalom"));

    repo.remove("greeting").await.unwrap();
    assert_eq!(repo.get("greeting").await.unwrap(), None);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    repo.put("k", "v").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn progress_snapshot_persists_through_sqlite() {
    let repo = connect("memdb_progress").await;
    let progress = KvProgressRepository::new(Arc::new(repo.clone()));

    let mut map = ProgressMap::new();
    map.record_answer(&WordId::new("2"), true, fixed_now());
    map.record_answer(&WordId::new("2"), true, fixed_now());
    map.record_answer(&WordId::new("9"), false, fixed_now());
    progress.save_progress(&map).await.unwrap();

    let loaded = progress.load_progress().await;
    assert_eq!(loaded, map);
    assert_eq!(loaded.get(&WordId::new("2")).unwrap().level(), 1.5);

    progress.reset_progress().await.unwrap();
    assert!(progress.load_progress().await.is_empty());
}

#[tokio::test]
async fn corrupt_sqlite_snapshot_is_treated_as_empty() {
    let repo = connect("memdb_corrupt").await;
    repo.put(PROGRESS_KEY, "[{\"wordId\": 1}]").await.unwrap();

    let progress = KvProgressRepository::new(Arc::new(repo));
    assert!(progress.load_progress().await.is_empty());
}

#[tokio::test]
async fn storage_sqlite_wires_progress_repository() {
    let storage = Storage::sqlite("sqlite::memory:").await.expect("storage");
    let mut map = ProgressMap::new();
    map.record_answer(&WordId::new("1"), true, fixed_now());
    storage.progress.save_progress(&map).await.unwrap();

    let raw = storage.kv.get(PROGRESS_KEY).await.unwrap().expect("snapshot");
    assert!(raw.contains("\"wordId\":\"1\""));
}
