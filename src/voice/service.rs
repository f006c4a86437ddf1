//! Voice service - runs transcripts through the recognition pipeline
//!
//! normalize -> match -> record history -> security gate -> dispatch
//!
//! One service serves one user session. Methods take `&mut self`, so
//! transcripts are handled one at a time and in arrival order.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::capture::SpeechCapture;
use super::clock::Clock;
use super::dispatch::{ActionDispatcher, DispatchOutcome};
use super::history::HistoryLedger;
use super::matcher::match_prompt;
use super::normalize::normalize;
use super::notify::{Notifier, PRIVILEGED_TOAST};
use super::prompts::{PromptError, PromptStore};
use super::security::{
    ConfirmOptions, GateDecision, GateRequest, PendingConfirmation, SecurityGate, SecurityState,
    derive_privileged_keys,
};
use super::types::{ListenError, Recognition, VoiceEvent};
use super::verification::VoiceVerifier;
use crate::domain::{DEFAULT_HISTORY_MAX, HistoryEntry, VoicePrompt};
use crate::store::{StoreError, VoiceStorage};

/// External collaborators a service talks to
#[derive(Clone)]
pub struct Collaborators {
    pub verifier: Arc<dyn VoiceVerifier>,
    pub dispatcher: Arc<dyn ActionDispatcher>,
    pub notifier: Arc<dyn Notifier>,
    pub capture: Arc<dyn SpeechCapture>,
    pub clock: Arc<dyn Clock>,
}

pub struct VoiceService {
    storage: VoiceStorage,
    prompts: PromptStore,
    history: HistoryLedger,
    gate: SecurityGate,
    dispatcher: Arc<dyn ActionDispatcher>,
    notifier: Arc<dyn Notifier>,
    capture: Arc<dyn SpeechCapture>,
    clock: Arc<dyn Clock>,
    default_history_max: usize,
    listening: bool,
    last_transcript: Option<String>,
    last_matched_action: Option<String>,
    subscribers: Vec<UnboundedSender<VoiceEvent>>,
}

impl VoiceService {
    /// Create a service; call [`initialize`](Self::initialize) before use
    pub fn new(storage: VoiceStorage, collaborators: Collaborators) -> Self {
        let Collaborators {
            verifier,
            dispatcher,
            notifier,
            capture,
            clock,
        } = collaborators;

        Self {
            prompts: PromptStore::new(storage.clone()),
            history: HistoryLedger::new(storage.clone(), DEFAULT_HISTORY_MAX),
            gate: SecurityGate::new(verifier, clock.clone()),
            storage,
            dispatcher,
            notifier,
            capture,
            clock,
            default_history_max: DEFAULT_HISTORY_MAX,
            listening: false,
            last_transcript: None,
            last_matched_action: None,
            subscribers: Vec::new(),
        }
    }

    /// History size used when none has been stored yet
    pub fn with_default_history_max(mut self, max: usize) -> Self {
        self.default_history_max = max;
        self
    }

    /// Load history, passphrase and privileged keys from storage
    pub async fn initialize(&mut self) {
        self.history.load(self.default_history_max).await;
        let passphrase = self.storage.passphrase().await;
        self.gate.state_mut().set_passphrase(passphrase.as_deref());
        self.refresh_privileged_keys().await;
        tracing::debug!(
            history = self.history.len(),
            max = self.history.max(),
            "Voice service initialized"
        );
    }

    /// Receive every future event on a new channel
    pub fn subscribe(&mut self) -> UnboundedReceiver<VoiceEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    // --- listening ---

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Start continuous recognition
    ///
    /// Feed every transcript from the returned receiver to
    /// [`on_transcript_received`](Self::on_transcript_received). A second call
    /// while listening fails with [`ListenError::AlreadyListening`] and leaves
    /// the running session untouched.
    pub async fn start_listening(&mut self) -> Result<UnboundedReceiver<String>, ListenError> {
        if self.listening {
            tracing::debug!("Voice listening already active");
            return Err(ListenError::AlreadyListening);
        }
        let (tx, rx) = mpsc::unbounded_channel();
        if !self.capture.start_continuous(tx).await {
            tracing::warn!("Speech recognition is not available");
            return Err(ListenError::Unavailable);
        }
        self.listening = true;
        tracing::info!("Voice listening started");
        Ok(rx)
    }

    /// Stop continuous recognition; later live transcripts are dropped
    pub async fn stop_listening(&mut self) {
        if !self.listening {
            return;
        }
        self.capture.stop().await;
        self.listening = false;
        tracing::info!("Voice listening stopped");
    }

    /// Handle a transcript from the live speech engine
    pub async fn on_transcript_received(&mut self, transcript: &str) -> Option<Recognition> {
        if !self.listening {
            tracing::debug!("Dropping transcript received while not listening");
            return None;
        }
        self.recognize(transcript, true).await
    }

    /// Handle typed text as if it had been heard
    ///
    /// With `execute == false` only feedback and history are updated.
    pub async fn simulate_recognition(&mut self, transcript: &str, execute: bool) -> Option<Recognition> {
        self.recognize(transcript, execute).await
    }

    /// Run an action directly, still subject to the security gate
    ///
    /// The passphrase is looked up in the last heard transcript.
    pub async fn run_action(&mut self, action_key: &str) -> Option<GateDecision> {
        let action_key = action_key.trim();
        if action_key.is_empty() {
            return None;
        }
        let transcript = normalize(self.last_transcript.as_deref().unwrap_or_default());
        Some(self.execute(action_key, action_key, &transcript).await)
    }

    // --- pending confirmation ---

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.gate.pending()
    }

    /// Dispatch the pending action; `None` when nothing was pending
    pub async fn confirm_pending(&mut self, options: ConfirmOptions) -> Option<DispatchOutcome> {
        let released = self.gate.confirm(options)?;
        self.emit(VoiceEvent::PendingChanged { pending: None });
        Some(self.dispatch(&released.action_key).await)
    }

    /// Drop the pending action; calling it again is harmless
    pub fn cancel_pending(&mut self) -> Option<PendingConfirmation> {
        let cancelled = self.gate.cancel();
        self.emit(VoiceEvent::PendingChanged { pending: None });
        cancelled
    }

    pub fn is_privileged(&self, action_key: &str) -> bool {
        !action_key.trim().is_empty() && self.gate.is_privileged(action_key)
    }

    pub fn security_state(&self) -> &SecurityState {
        self.gate.state()
    }

    // --- feedback and history ---

    pub fn last_transcript(&self) -> Option<&str> {
        self.last_transcript.as_deref()
    }

    /// Name of the action matched by the last transcript
    pub fn last_matched_action(&self) -> Option<&str> {
        self.last_matched_action.as_deref()
    }

    pub fn clear_feedback(&mut self) {
        self.last_transcript = None;
        self.last_matched_action = None;
        self.emit(VoiceEvent::FeedbackChanged);
    }

    /// History entries, most recent first
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.entries()
    }

    pub fn history_max(&self) -> usize {
        self.history.max()
    }

    /// Change the history size; returns the clamped value
    pub async fn set_history_max(&mut self, value: i64) -> usize {
        let max = self.history.set_max(value).await;
        self.emit(VoiceEvent::FeedbackChanged);
        max
    }

    pub async fn clear_history(&mut self) {
        self.history.clear().await;
        self.emit(VoiceEvent::FeedbackChanged);
    }

    // --- prompts ---

    pub async fn prompts(&self) -> Vec<VoicePrompt> {
        self.prompts.list().await
    }

    pub async fn add_prompt(&mut self, prompt: VoicePrompt) -> Result<(), PromptError> {
        self.prompts.add(prompt).await?;
        self.refresh_privileged_keys().await;
        Ok(())
    }

    pub async fn update_prompt(&mut self, prompt: VoicePrompt) -> Result<(), PromptError> {
        self.prompts.update(prompt).await?;
        self.refresh_privileged_keys().await;
        Ok(())
    }

    pub async fn remove_prompt(&mut self, id: &str) -> Result<bool, PromptError> {
        let removed = self.prompts.remove(id).await?;
        if removed {
            self.refresh_privileged_keys().await;
        }
        Ok(removed)
    }

    pub async fn replace_prompts(&mut self, prompts: Vec<VoicePrompt>) -> Result<(), PromptError> {
        self.prompts.replace_all(prompts).await?;
        self.refresh_privileged_keys().await;
        Ok(())
    }

    // --- settings ---

    pub fn storage(&self) -> &VoiceStorage {
        &self.storage
    }

    /// Store a new passphrase (`None` or blank removes it)
    pub async fn set_passphrase(&mut self, passphrase: Option<&str>) -> Result<(), StoreError> {
        self.storage.set_passphrase(passphrase).await?;
        self.gate.state_mut().set_passphrase(passphrase);
        Ok(())
    }

    pub fn has_passphrase(&self) -> bool {
        self.gate.state().passphrase().is_some()
    }

    pub async fn set_auto_privilege_create(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.storage.set_auto_privilege_create(enabled).await?;
        self.refresh_privileged_keys().await;
        Ok(())
    }

    pub async fn set_toasts_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        self.storage.set_toasts_enabled(enabled).await
    }

    // --- backup ---

    pub async fn export_all(&self) -> Result<String, StoreError> {
        self.storage.export_all().await
    }

    /// Restore a backup and reload everything derived from it
    pub async fn import_all(&mut self, json: &str) -> Result<bool, StoreError> {
        let imported = self.storage.import_all(json).await?;
        if imported {
            self.initialize().await;
            self.emit(VoiceEvent::FeedbackChanged);
        }
        Ok(imported)
    }

    // --- pipeline ---

    async fn recognize(&mut self, transcript: &str, execute: bool) -> Option<Recognition> {
        let normalized = normalize(transcript);
        if normalized.is_empty() {
            return None;
        }

        let prompts = self.prompts.list().await;
        let matched = match_prompt(&normalized, &prompts).cloned();

        self.last_transcript = Some(transcript.to_string());
        self.last_matched_action = matched.as_ref().and_then(|p| p.action_name.clone());
        self.history
            .record(HistoryEntry::new(transcript, matched.as_ref(), self.clock.now()))
            .await;
        self.emit(VoiceEvent::FeedbackChanged);

        let decision = match &matched {
            Some(prompt) if execute => Some(
                self.execute(prompt.action_key_str(), prompt.action_name_str(), &normalized)
                    .await,
            ),
            _ => None,
        };

        Some(Recognition {
            transcript: transcript.to_string(),
            normalized,
            matched,
            decision,
        })
    }

    async fn execute(&mut self, action_key: &str, action_name: &str, transcript: &str) -> GateDecision {
        let decision = self
            .gate
            .evaluate(GateRequest {
                action_key,
                action_name,
                transcript,
            })
            .await;

        if decision.is_approved() {
            self.dispatch(action_key).await;
        } else {
            let pending = self.gate.pending().cloned();
            self.emit(VoiceEvent::PendingChanged { pending });
        }
        decision
    }

    async fn dispatch(&mut self, action_key: &str) -> DispatchOutcome {
        let outcome = self.dispatcher.dispatch(action_key).await;
        tracing::info!(action_key, ?outcome, "Voice action dispatched");
        self.emit(VoiceEvent::ActionDispatched {
            action_key: action_key.to_string(),
            outcome,
        });

        if self.is_privileged(action_key) && self.storage.toasts_enabled().await {
            if let Err(e) = self.notifier.toast(PRIVILEGED_TOAST).await {
                tracing::debug!("Ignoring failed voice notification: {}", e);
            }
        }
        outcome
    }

    async fn refresh_privileged_keys(&mut self) {
        let prompts = self.prompts.list().await;
        let auto = self.storage.auto_privilege_create().await;
        let keys = derive_privileged_keys(&prompts, auto);
        tracing::debug!("{} privileged voice actions", keys.len());
        self.gate.state_mut().set_privileged_keys(keys);
    }

    fn emit(&mut self, event: VoiceEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
