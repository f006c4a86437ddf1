use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::VoicePrompt;

/// One recognition event as shown in the voice history menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Raw text as heard (not normalized)
    pub transcript: String,

    /// Name of the matched action, if any
    #[serde(default)]
    pub action_name: Option<String>,

    /// Key of the matched action, if any
    #[serde(default)]
    pub action_key: Option<String>,

    /// When the transcript was received
    #[serde(rename = "at", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        transcript: impl Into<String>,
        matched: Option<&VoicePrompt>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            transcript: transcript.into(),
            action_name: matched.and_then(|p| p.action_name.clone()),
            action_key: matched.and_then(|p| p.action_key.clone()),
            timestamp,
        }
    }

    pub fn is_match(&self) -> bool {
        self.action_key.is_some()
    }
}

/// Default number of history entries kept
pub const DEFAULT_HISTORY_MAX: usize = 10;

/// Upper bound for the configurable history size
pub const HISTORY_MAX_LIMIT: usize = 50;

/// Clamp a requested history size into `0..=HISTORY_MAX_LIMIT`
pub fn clamp_history_max(value: i64) -> usize {
    value.clamp(0, HISTORY_MAX_LIMIT as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_history_max_bounds() {
        assert_eq!(clamp_history_max(-5), 0);
        assert_eq!(clamp_history_max(0), 0);
        assert_eq!(clamp_history_max(17), 17);
        assert_eq!(clamp_history_max(50), 50);
        assert_eq!(clamp_history_max(i64::MAX), 50);
    }

    #[test]
    fn reads_legacy_at_and_timestamp_keys() {
        let a: HistoryEntry =
            serde_json::from_str(r#"{"transcript":"show jobs","at":"2026-01-02T03:04:05Z"}"#)
                .unwrap();
        let b: HistoryEntry = serde_json::from_str(
            r#"{"transcript":"show jobs","timestamp":"2026-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(a, b);
        assert!(!a.is_match());
    }

    #[test]
    fn new_copies_matched_prompt_fields() {
        let prompt = VoicePrompt::new("Show Jobs", "show_jobs", "show jobs");
        let entry = HistoryEntry::new("Show Jobs please", Some(&prompt), Utc::now());
        assert_eq!(entry.action_key.as_deref(), Some("show_jobs"));
        assert_eq!(entry.action_name.as_deref(), Some("Show Jobs"));
        assert!(entry.is_match());
    }
}
