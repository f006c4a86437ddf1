//! Settings sections of `config.toml`

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_HISTORY_MAX, clamp_history_max};
use crate::voice::verification::SampleDurations;

/// Where voice data is persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite database file
    /// Default: ~/.aimate/voice.db
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StorageSettings {
    /// Configured database path, or the default under the config directory
    pub fn db_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| super::Config::global_config_dir().join("voice.db"))
    }
}

/// Invoicing backend used by actions with side effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the REST API (e.g., "http://localhost:5000")
    /// When unset, voice-created jobs are skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ApiSettings {
    /// Base URL, ignoring a blank value
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

/// Speaker verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSettings {
    /// Base URL of the verification service (e.g., "http://localhost:5000")
    /// When unset, samples are only compared locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,

    /// Connect and read timeout for backend calls (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Length of the sample captured for verification (in seconds)
    #[serde(default = "default_verify_sample_secs")]
    pub verify_sample_secs: u32,

    /// Length of the sample captured for enrollment (in seconds)
    #[serde(default = "default_enroll_sample_secs")]
    pub enroll_sample_secs: u32,
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_verify_sample_secs() -> u32 {
    2
}

fn default_enroll_sample_secs() -> u32 {
    3
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            backend_url: None,
            timeout_secs: default_timeout_secs(),
            verify_sample_secs: default_verify_sample_secs(),
            enroll_sample_secs: default_enroll_sample_secs(),
        }
    }
}

impl VerificationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn sample_durations(&self) -> SampleDurations {
        SampleDurations {
            verify_secs: self.verify_sample_secs,
            enroll_secs: self.enroll_sample_secs,
        }
    }

    /// Backend URL, ignoring a blank value
    pub fn backend_url(&self) -> Option<&str> {
        self.backend_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

/// Voice command settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// History size used until the user picks one (0-50)
    #[serde(default = "default_history_max")]
    pub default_history_max: usize,
}

fn default_history_max() -> usize {
    DEFAULT_HISTORY_MAX
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            default_history_max: default_history_max(),
        }
    }
}

impl VoiceSettings {
    /// Configured default, clamped to the allowed range
    pub fn history_max(&self) -> usize {
        clamp_history_max(self.default_history_max as i64)
    }
}
