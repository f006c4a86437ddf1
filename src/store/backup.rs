//! Export/import document for voice data

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_HISTORY_MAX, HistoryEntry, VoicePrompt};

/// Current backup format version
pub const BACKUP_VERSION: &str = "2";

/// Backup of everything a user configured for voice commands
///
/// Version 2 documents from the web client may carry business profiles as
/// well; those fields are not part of the voice data and are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupModel {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub prompts: Vec<VoicePrompt>,

    #[serde(default)]
    pub history: Vec<HistoryEntry>,

    #[serde(default = "default_history_max")]
    pub history_max: i64,
}

fn default_version() -> String {
    BACKUP_VERSION.to_string()
}

fn default_history_max() -> i64 {
    DEFAULT_HISTORY_MAX as i64
}

impl BackupModel {
    pub fn new(prompts: Vec<VoicePrompt>, history: Vec<HistoryEntry>, history_max: usize) -> Self {
        Self {
            version: default_version(),
            prompts,
            history,
            history_max: history_max as i64,
        }
    }
}
