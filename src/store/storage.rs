//! Typed accessors over the raw key/value store

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backup::BackupModel;
use super::{KeyValueStore, StoreError, keys};
use crate::domain::{HistoryEntry, VoicePrompt, clamp_history_max};

/// Voice settings and data persisted for one user
///
/// Getters never fail: an unreadable or malformed value is logged and the
/// fallback is returned. Setters report storage failures to the caller.
#[derive(Clone)]
pub struct VoiceStorage {
    kv: Arc<dyn KeyValueStore>,
}

impl VoiceStorage {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored prompts with unique ids
    ///
    /// Entries written without an id, or sharing an id with an earlier entry,
    /// get a fresh id that is persisted right away so later edits can find them.
    pub async fn prompts(&self) -> Vec<VoicePrompt> {
        let mut prompts: Vec<VoicePrompt> = self.read_json(keys::PROMPTS).await.unwrap_or_default();
        if assign_unique_ids(&mut prompts) {
            if let Err(e) = self.save_prompts(&prompts).await {
                tracing::warn!("Failed to persist assigned prompt ids: {}", e);
            }
        }
        prompts
    }

    pub async fn save_prompts(&self, prompts: &[VoicePrompt]) -> Result<(), StoreError> {
        self.write_json(keys::PROMPTS, prompts).await
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.read_json(keys::HISTORY).await.unwrap_or_default()
    }

    pub async fn save_history(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        self.write_json(keys::HISTORY, entries).await
    }

    /// Stored history size, clamped to `0..=50`
    pub async fn history_max(&self, fallback: usize) -> usize {
        match self.read_raw(keys::HISTORY_MAX).await {
            Some(v) => match v.trim().parse::<i64>() {
                Ok(n) => clamp_history_max(n),
                Err(_) => fallback,
            },
            None => fallback,
        }
    }

    /// Persist a history size; returns the clamped value actually stored
    pub async fn set_history_max(&self, value: i64) -> Result<usize, StoreError> {
        let clamped = clamp_history_max(value);
        self.kv.set(keys::HISTORY_MAX, &clamped.to_string()).await?;
        Ok(clamped)
    }

    pub async fn toasts_enabled(&self) -> bool {
        self.read_flag(keys::TOASTS, true).await
    }

    pub async fn set_toasts_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        self.write_flag(keys::TOASTS, enabled).await
    }

    pub async fn voice_enforce(&self) -> bool {
        self.read_flag(keys::VOICE_ENFORCE, false).await
    }

    pub async fn set_voice_enforce(&self, enforce: bool) -> Result<(), StoreError> {
        self.write_flag(keys::VOICE_ENFORCE, enforce).await
    }

    /// Enrolled voice samples (opaque capture payloads)
    pub async fn enrollment(&self) -> Vec<String> {
        self.read_json(keys::VOICE_ENROLL).await.unwrap_or_default()
    }

    pub async fn set_enrollment(&self, samples: &[String]) -> Result<(), StoreError> {
        self.write_json(keys::VOICE_ENROLL, samples).await
    }

    /// The configured passphrase, `None` when unset or blank
    pub async fn passphrase(&self) -> Option<String> {
        self.read_raw(keys::PASSPHRASE)
            .await
            .filter(|p| !p.trim().is_empty())
    }

    pub async fn set_passphrase(&self, value: Option<&str>) -> Result<(), StoreError> {
        self.kv.set(keys::PASSPHRASE, value.unwrap_or_default()).await
    }

    /// Whether `create_*` actions are privileged automatically
    pub async fn auto_privilege_create(&self) -> bool {
        self.read_flag(keys::AUTO_PRIV_CREATE, true).await
    }

    pub async fn set_auto_privilege_create(&self, enabled: bool) -> Result<(), StoreError> {
        self.write_flag(keys::AUTO_PRIV_CREATE, enabled).await
    }

    /// Serialize prompts, history and history size as one JSON document
    pub async fn export_all(&self) -> Result<String, StoreError> {
        let model = BackupModel::new(
            self.prompts().await,
            self.history().await,
            self.history_max(crate::domain::DEFAULT_HISTORY_MAX).await,
        );
        Ok(serde_json::to_string(&model)?)
    }

    /// Restore a document produced by [`export_all`](Self::export_all)
    ///
    /// Blank or malformed input is ignored. Returns whether anything was written.
    pub async fn import_all(&self, json: &str) -> Result<bool, StoreError> {
        if json.trim().is_empty() {
            return Ok(false);
        }
        let model: BackupModel = match serde_json::from_str(json) {
            Ok(model) => model,
            Err(e) => {
                tracing::warn!("Ignoring malformed voice backup: {}", e);
                return Ok(false);
            }
        };
        let mut prompts = model.prompts;
        if assign_unique_ids(&mut prompts) {
            tracing::info!("Assigned fresh ids to imported prompts with missing or repeated ids");
        }
        self.save_prompts(&prompts).await?;
        self.save_history(&model.history).await?;
        self.set_history_max(model.history_max).await?;
        Ok(true)
    }

    async fn read_raw(&self, key: &str) -> Option<String> {
        match self.kv.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key).await?;
        if raw.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", key, e);
                None
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.kv.set(key, &json).await
    }

    async fn read_flag(&self, key: &str, fallback: bool) -> bool {
        match self.read_raw(key).await {
            Some(v) if !v.trim().is_empty() => parse_flag(&v),
            _ => fallback,
        }
    }

    async fn write_flag(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.kv.set(key, if value { "1" } else { "0" }).await
    }
}

/// Give blank and repeated ids a fresh id, keeping the first holder of each id
fn assign_unique_ids(prompts: &mut [VoicePrompt]) -> bool {
    let mut seen = HashSet::new();
    let mut changed = false;
    for prompt in prompts.iter_mut() {
        if !prompt.id.trim().is_empty() && seen.contains(&prompt.id) {
            prompt.id.clear();
        }
        changed |= prompt.ensure_id();
        seen.insert(prompt.id.clone());
    }
    changed
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}
