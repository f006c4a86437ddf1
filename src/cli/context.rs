//! Shared setup for commands that touch voice data

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use aimate_voice::config::Config;
use aimate_voice::store::{SqliteStore, VoiceStorage};
use aimate_voice::voice::verification::HttpVerificationBackend;
use aimate_voice::voice::{
    ActionDispatcher, AppDispatcher, Collaborators, HttpJobApi, LogNotifier, Navigator,
    NoJobApi, SpeechCapture, SystemClock, VoiceSecurity, VoiceService,
};

/// Navigator that prints the page the app would show
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, route: &str) {
        println!("  -> {}", route);
    }
}

/// Loaded configuration plus resolved file locations
pub struct CliContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub db_path: PathBuf,
}

impl CliContext {
    /// Load the config (auto-created when missing) and resolve the database path
    pub fn load(config_override: Option<PathBuf>, db_override: Option<PathBuf>) -> Result<Self> {
        let config_path = config_override.unwrap_or_else(Config::global_config_path);
        let config = Config::load_or_init(&config_path)?;
        let db_path = db_override.unwrap_or_else(|| config.storage.db_path());

        Ok(Self {
            config,
            config_path,
            db_path,
        })
    }

    pub fn storage(&self) -> Result<VoiceStorage> {
        let store = SqliteStore::open(&self.db_path)
            .with_context(|| format!("Failed to open voice database: {}", self.db_path.display()))?;
        Ok(VoiceStorage::new(Arc::new(store)))
    }

    /// Verification wired to the configured backend, if any
    pub fn voice_security(&self, storage: VoiceStorage, capture: Arc<dyn SpeechCapture>) -> VoiceSecurity {
        let settings = &self.config.verification;
        let security = VoiceSecurity::new(storage, capture).with_durations(settings.sample_durations());
        match settings.backend_url() {
            Some(url) => security.with_backend(Arc::new(HttpVerificationBackend::new(url, settings.timeout()))),
            None => security,
        }
    }

    fn dispatcher(&self) -> Arc<dyn ActionDispatcher> {
        match self.config.api.base_url() {
            Some(url) => {
                let jobs = HttpJobApi::new(url, self.config.verification.timeout());
                Arc::new(AppDispatcher::new(PrintNavigator, jobs))
            }
            None => Arc::new(AppDispatcher::new(PrintNavigator, NoJobApi)),
        }
    }

    /// Build and initialize a service over the configured database
    pub async fn service(&self, capture: Arc<dyn SpeechCapture>) -> Result<VoiceService> {
        let storage = self.storage()?;
        let security = self.voice_security(storage.clone(), capture.clone());

        let collaborators = Collaborators {
            verifier: Arc::new(security),
            dispatcher: self.dispatcher(),
            notifier: Arc::new(LogNotifier),
            capture,
            clock: Arc::new(SystemClock),
        };

        let mut service = VoiceService::new(storage, collaborators)
            .with_default_history_max(self.config.voice.history_max());
        service.initialize().await;
        Ok(service)
    }
}
