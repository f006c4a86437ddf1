//! Shared test utilities for voice pipeline integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::mpsc::UnboundedSender;

use aimate_voice::store::{KeyValueStore, MemoryStore, VoiceStorage};
use aimate_voice::voice::{
    AppDispatcher, Collaborators, JobApi, ManualClock, Navigator, Notifier, SpeechCapture,
    VoiceService, VoiceVerifier,
};
use aimate_voice::VoicePrompt;

/// Shared list of strings recorded by a collaborator
pub type Log = Arc<Mutex<Vec<String>>>;

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub struct RecordingNavigator(pub Log);

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.0.lock().unwrap().push(route.to_string());
    }
}

pub struct RecordingJobs {
    pub titles: Log,
    pub fail: Arc<AtomicBool>,
}

#[async_trait]
impl JobApi for RecordingJobs {
    async fn create_job(&self, title: &str) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("jobs API unreachable");
        }
        self.titles.lock().unwrap().push(title.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Log,
    pub fail: AtomicBool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn toast(&self, message: &str) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("toast surface gone");
        }
        self.toasts.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// Verifier whose answer is set by the test
#[derive(Default)]
pub struct FakeVerifier {
    pub enforced: AtomicBool,
    pub passes: AtomicBool,
    pub calls: AtomicUsize,
}

impl FakeVerifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn enforce(&self, passes: bool) {
        self.enforced.store(true, Ordering::SeqCst);
        self.passes.store(passes, Ordering::SeqCst);
    }
}

#[async_trait]
impl VoiceVerifier for FakeVerifier {
    async fn is_enforced(&self) -> bool {
        self.enforced.load(Ordering::SeqCst)
    }

    async fn verify(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.passes.load(Ordering::SeqCst)
    }
}

/// Speech engine driven by the test
pub struct ScriptedCapture {
    pub available: AtomicBool,
    sink: Mutex<Option<UnboundedSender<String>>>,
}

impl Default for ScriptedCapture {
    fn default() -> Self {
        Self {
            available: AtomicBool::new(true),
            sink: Mutex::new(None),
        }
    }
}

impl ScriptedCapture {
    /// Emit a transcript as the engine would; `false` when nobody listens
    pub fn say(&self, text: &str) -> bool {
        match self.sink.lock().unwrap().as_ref() {
            Some(tx) => tx.send(text.to_string()).is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl SpeechCapture for ScriptedCapture {
    async fn start_continuous(&self, transcripts: UnboundedSender<String>) -> bool {
        if !self.available.load(Ordering::SeqCst) {
            return false;
        }
        *self.sink.lock().unwrap() = Some(transcripts);
        true
    }

    async fn stop(&self) {
        self.sink.lock().unwrap().take();
    }

    async fn record_once(&self, _duration_secs: u32) -> Option<String> {
        None
    }
}

/// A service wired to recording collaborators
pub struct Harness {
    pub service: VoiceService,
    pub storage: VoiceStorage,
    pub clock: Arc<ManualClock>,
    pub verifier: Arc<FakeVerifier>,
    pub notifier: Arc<RecordingNotifier>,
    pub capture: Arc<ScriptedCapture>,
    pub routes: Log,
    pub jobs: Log,
    pub jobs_fail: Arc<AtomicBool>,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_prompts(Vec::new()).await
    }

    /// Harness over an in-memory store seeded with `prompts`
    pub async fn with_prompts(prompts: Vec<VoicePrompt>) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), prompts).await
    }

    pub async fn with_store(kv: Arc<dyn KeyValueStore>, prompts: Vec<VoicePrompt>) -> Self {
        let storage = VoiceStorage::new(kv);
        if !prompts.is_empty() {
            storage.save_prompts(&prompts).await.unwrap();
        }

        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        ));
        let verifier = Arc::new(FakeVerifier::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let capture = Arc::new(ScriptedCapture::default());
        let routes: Log = Arc::default();
        let jobs: Log = Arc::default();
        let jobs_fail = Arc::new(AtomicBool::new(false));

        let dispatcher = AppDispatcher::new(
            RecordingNavigator(routes.clone()),
            RecordingJobs {
                titles: jobs.clone(),
                fail: jobs_fail.clone(),
            },
        );

        let mut service = VoiceService::new(
            storage.clone(),
            Collaborators {
                verifier: verifier.clone(),
                dispatcher: Arc::new(dispatcher),
                notifier: notifier.clone(),
                capture: capture.clone(),
                clock: clock.clone(),
            },
        );
        service.initialize().await;

        Self {
            service,
            storage,
            clock,
            verifier,
            notifier,
            capture,
            routes,
            jobs,
            jobs_fail,
        }
    }

    pub fn routes(&self) -> Vec<String> {
        entries(&self.routes)
    }

    pub fn toasts(&self) -> Vec<String> {
        entries(&self.notifier.toasts)
    }
}

/// The prompts of a typical small-business setup
pub fn standard_prompts() -> Vec<VoicePrompt> {
    vec![
        VoicePrompt::new("Show Jobs", "show_jobs", "show jobs").with_id("jobs"),
        VoicePrompt::new("Create Invoice", "create_invoice", "create invoice").with_id("new-invoice"),
        VoicePrompt::new("Show Clients", "show_clients", "clients").with_id("clients"),
        VoicePrompt::new("Create Job", "create_job", "new job").with_id("new-job"),
        VoicePrompt::new("Settings", "show_settings", "open settings")
            .with_id("settings")
            .privileged(),
    ]
}
