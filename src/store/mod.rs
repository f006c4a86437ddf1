//! Persistence for prompts, history and voice security settings
//!
//! Values are kept in a flat key/value namespace (one JSON or flag string per
//! key) behind the [`KeyValueStore`] trait. [`VoiceStorage`] layers the typed
//! accessors on top and owns the fallback rules: a failed or malformed read
//! yields the default value instead of an error.

mod backup;
mod memory;
mod sqlite;
mod storage;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use thiserror::Error;

pub use backup::{BackupModel, BACKUP_VERSION};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use storage::VoiceStorage;

/// Storage keys. The `_v1` suffix matches the keys written by the web client.
pub mod keys {
    pub const PROMPTS: &str = "aimate_voice_prompts_v1";
    pub const HISTORY: &str = "aimate_voice_history_v1";
    pub const HISTORY_MAX: &str = "aimate_voice_history_max_v1";
    pub const TOASTS: &str = "aimate_voice_toasts_enabled_v1";
    pub const VOICE_ENFORCE: &str = "aimate_voice_enforce_v1";
    pub const VOICE_ENROLL: &str = "aimate_voice_enroll_v1";
    pub const PASSPHRASE: &str = "aimate_voice_passphrase_v1";
    pub const AUTO_PRIV_CREATE: &str = "aimate_voice_autopriv_create_v1";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Raw key/value persistence used by [`VoiceStorage`]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write (or overwrite) a value
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
