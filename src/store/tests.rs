use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::*;
use crate::domain::{HistoryEntry, VoicePrompt};

/// Store whose reads and writes always fail
struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::LockPoisoned)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::LockPoisoned)
    }
}

fn memory_storage() -> (Arc<MemoryStore>, VoiceStorage) {
    let kv = Arc::new(MemoryStore::new());
    let storage = VoiceStorage::new(kv.clone());
    (kv, storage)
}

#[tokio::test]
async fn defaults_when_nothing_stored() {
    let (_, storage) = memory_storage();
    assert!(storage.prompts().await.is_empty());
    assert!(storage.history().await.is_empty());
    assert_eq!(storage.history_max(10).await, 10);
    assert!(storage.toasts_enabled().await);
    assert!(!storage.voice_enforce().await);
    assert!(storage.auto_privilege_create().await);
    assert!(storage.passphrase().await.is_none());
    assert!(storage.enrollment().await.is_empty());
}

#[tokio::test]
async fn read_failures_fall_back_to_defaults() {
    let storage = VoiceStorage::new(Arc::new(BrokenStore));
    assert!(storage.prompts().await.is_empty());
    assert_eq!(storage.history_max(7).await, 7);
    assert!(storage.auto_privilege_create().await);
    assert!(!storage.voice_enforce().await);
    assert!(storage.save_prompts(&[]).await.is_err());
}

#[tokio::test]
async fn malformed_values_fall_back_to_defaults() {
    let (kv, storage) = memory_storage();
    kv.set(keys::PROMPTS, "{not json").await.unwrap();
    kv.set(keys::HISTORY_MAX, "lots").await.unwrap();
    assert!(storage.prompts().await.is_empty());
    assert_eq!(storage.history_max(10).await, 10);
}

#[tokio::test]
async fn flags_accept_one_and_true() {
    let (kv, storage) = memory_storage();
    kv.set(keys::VOICE_ENFORCE, "TRUE").await.unwrap();
    assert!(storage.voice_enforce().await);
    kv.set(keys::VOICE_ENFORCE, "1").await.unwrap();
    assert!(storage.voice_enforce().await);
    kv.set(keys::VOICE_ENFORCE, "yes").await.unwrap();
    assert!(!storage.voice_enforce().await);

    storage.set_toasts_enabled(false).await.unwrap();
    assert_eq!(kv.get(keys::TOASTS).await.unwrap().as_deref(), Some("0"));
}

#[tokio::test]
async fn history_max_is_clamped_on_write_and_read() {
    let (kv, storage) = memory_storage();
    assert_eq!(storage.set_history_max(99).await.unwrap(), 50);
    assert_eq!(storage.history_max(10).await, 50);
    kv.set(keys::HISTORY_MAX, "-3").await.unwrap();
    assert_eq!(storage.history_max(10).await, 0);
}

#[tokio::test]
async fn blank_passphrase_reads_as_unset() {
    let (_, storage) = memory_storage();
    storage.set_passphrase(Some("let me in")).await.unwrap();
    assert_eq!(storage.passphrase().await.as_deref(), Some("let me in"));
    storage.set_passphrase(Some("   ")).await.unwrap();
    assert!(storage.passphrase().await.is_none());
    storage.set_passphrase(None).await.unwrap();
    assert!(storage.passphrase().await.is_none());
}

#[tokio::test]
async fn export_then_import_into_fresh_store() {
    let (_, source) = memory_storage();
    let prompt = VoicePrompt::new("Show Jobs", "show_jobs", "show jobs");
    source.save_prompts(&[prompt.clone()]).await.unwrap();
    source
        .save_history(&[HistoryEntry::new("show jobs", Some(&prompt), Utc::now())])
        .await
        .unwrap();
    source.set_history_max(25).await.unwrap();

    let json = source.export_all().await.unwrap();
    assert!(json.contains("\"version\":\"2\""));
    assert!(json.contains("\"historyMax\":25"));

    let (_, target) = memory_storage();
    assert!(target.import_all(&json).await.unwrap());
    assert_eq!(target.prompts().await, vec![prompt]);
    assert_eq!(target.history().await.len(), 1);
    assert_eq!(target.history_max(10).await, 25);
}

#[tokio::test]
async fn import_ignores_blank_and_malformed_input() {
    let (kv, storage) = memory_storage();
    assert!(!storage.import_all("   ").await.unwrap());
    assert!(!storage.import_all("{broken").await.unwrap());
    assert!(kv.keys().await.is_empty());
}

#[tokio::test]
async fn import_gives_repeated_ids_fresh_ones() {
    let (_, storage) = memory_storage();
    let json = r#"{
        "prompts": [
            {"id":"p1","actionKey":"show_jobs","phrase":"jobs"},
            {"id":"p1","actionKey":"show_clients","phrase":"clients"},
            {"actionKey":"show_settings","phrase":"settings"}
        ]
    }"#;
    assert!(storage.import_all(json).await.unwrap());

    let prompts = storage.prompts().await;
    assert_eq!(prompts.len(), 3);
    assert_eq!(prompts[0].id, "p1");
    assert_eq!(prompts[0].action_key_str(), "show_jobs");
    assert_ne!(prompts[1].id, "p1");
    assert!(!prompts[2].id.is_empty());
    assert_ne!(prompts[1].id, prompts[2].id);
}

#[tokio::test]
async fn missing_prompt_ids_are_assigned_once_and_persisted() {
    let (kv, storage) = memory_storage();
    kv.set(keys::PROMPTS, r#"[{"actionKey":"show_jobs","phrase":"jobs"}]"#)
        .await
        .unwrap();

    let first = storage.prompts().await;
    assert_eq!(first[0].id.len(), 32);
    let second = storage.prompts().await;
    assert_eq!(first[0].id, second[0].id);

    let raw = kv.get(keys::PROMPTS).await.unwrap().unwrap();
    assert!(raw.contains(&first[0].id));
}

#[tokio::test]
async fn import_accepts_web_client_backup_with_profiles() {
    let (_, storage) = memory_storage();
    let json = r#"{
        "version": "2",
        "prompts": [{"id":"p1","actionName":"Show Jobs","actionKey":"show_jobs","phrase":"jobs"}],
        "history": [],
        "historyMax": 5,
        "businessProfiles": [{"id":"b1"}],
        "activeProfileId": "b1"
    }"#;
    assert!(storage.import_all(json).await.unwrap());
    assert_eq!(storage.prompts().await[0].id, "p1");
    assert_eq!(storage.history_max(10).await, 5);
}

#[tokio::test]
async fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("voice.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        store.set(keys::PASSPHRASE, "open sesame").await.unwrap();
        store.set(keys::PASSPHRASE, "let me in").await.unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(
        store.get(keys::PASSPHRASE).await.unwrap().as_deref(),
        Some("let me in")
    );
    assert!(store.get(keys::PROMPTS).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_store_backs_typed_storage() {
    let storage = VoiceStorage::new(Arc::new(SqliteStore::open_in_memory().unwrap()));
    let prompts = vec![
        VoicePrompt::new("Create Job", "create_job", "new job").privileged(),
        VoicePrompt::new("Show Jobs", "show_jobs", "show jobs").hidden(),
    ];
    storage.save_prompts(&prompts).await.unwrap();
    assert_eq!(storage.prompts().await, prompts);
}
