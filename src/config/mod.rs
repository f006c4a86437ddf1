//! Configuration loading and management

mod io;
mod settings;


pub use settings::{ApiSettings, StorageSettings, VerificationSettings, VoiceSettings};

use serde::{Deserialize, Serialize};

/// Main configuration structure (`~/.aimate/config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Persistence settings
    #[serde(default)]
    pub storage: StorageSettings,

    /// App backend settings
    #[serde(default)]
    pub api: ApiSettings,

    /// Speaker verification settings
    #[serde(default)]
    pub verification: VerificationSettings,

    /// Voice command settings
    #[serde(default)]
    pub voice: VoiceSettings,
}
