use serde::Serialize;
use thiserror::Error;

use super::dispatch::DispatchOutcome;
use super::security::{GateDecision, PendingConfirmation};
use crate::domain::VoicePrompt;

/// Why continuous listening did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListenError {
    #[error("voice listening is already active")]
    AlreadyListening,

    #[error("speech recognition is not available")]
    Unavailable,
}

/// Change notifications for whoever renders voice state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoiceEvent {
    /// Last transcript, last matched action or history changed
    FeedbackChanged,
    /// The pending confirmation was set, replaced or cleared
    PendingChanged { pending: Option<PendingConfirmation> },
    /// An approved action reached the dispatcher
    ActionDispatched {
        action_key: String,
        outcome: DispatchOutcome,
    },
}

/// What happened to one transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recognition {
    /// Text as heard
    pub transcript: String,
    pub normalized: String,
    pub matched: Option<VoicePrompt>,
    /// Gate result; `None` when nothing was evaluated
    pub decision: Option<GateDecision>,
}

impl Recognition {
    pub fn matched_key(&self) -> Option<&str> {
        self.matched.as_ref().and_then(|p| p.action_key.as_deref())
    }

    pub fn executed(&self) -> bool {
        self.decision.is_some_and(|d| d.is_approved())
    }
}
