use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::pending::{ConfirmOptions, PendingConfirmation, PendingReason};
use super::state::SecurityState;
use super::verify_cache_window;
use crate::voice::clock::Clock;
use crate::voice::verification::VoiceVerifier;

/// Outcome of one gate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Approved,
    RateLimited,
    VerificationPending,
    PassphrasePending,
}

impl GateDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, GateDecision::Approved)
    }

    fn from_reason(reason: PendingReason) -> Self {
        match reason {
            PendingReason::RateLimited => GateDecision::RateLimited,
            PendingReason::VerificationFailed => GateDecision::VerificationPending,
            PendingReason::MissingPassphrase => GateDecision::PassphrasePending,
        }
    }
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateDecision::Approved => write!(f, "approved"),
            GateDecision::RateLimited => write!(f, "rate limited"),
            GateDecision::VerificationPending => write!(f, "verification pending"),
            GateDecision::PassphrasePending => write!(f, "passphrase pending"),
        }
    }
}

/// One execution request
#[derive(Debug, Clone, Copy)]
pub struct GateRequest<'a> {
    pub action_key: &'a str,
    pub action_name: &'a str,
    /// Normalized transcript the passphrase is looked up in
    pub transcript: &'a str,
}

pub struct SecurityGate {
    state: SecurityState,
    pending: Option<PendingConfirmation>,
    verifier: Arc<dyn VoiceVerifier>,
    clock: Arc<dyn Clock>,
}

impl SecurityGate {
    pub fn new(verifier: Arc<dyn VoiceVerifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: SecurityState::default(),
            pending: None,
            verifier,
            clock,
        }
    }

    pub fn state(&self) -> &SecurityState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SecurityState {
        &mut self.state
    }

    pub fn is_privileged(&self, action_key: &str) -> bool {
        self.state.is_privileged(action_key)
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Run the checks for one execution attempt
    ///
    /// A blocked attempt replaces whatever was pending before.
    pub async fn evaluate(&mut self, request: GateRequest<'_>) -> GateDecision {
        let now = self.clock.now();

        if !self.state.rate_limiter.admit(now) {
            return self.hold(request, PendingReason::RateLimited);
        }

        if self.verifier.is_enforced().await && !self.state.verified_within(now, verify_cache_window()) {
            if !self.verifier.verify().await {
                return self.hold(request, PendingReason::VerificationFailed);
            }
            tracing::debug!("Voice verified, caching until {}", now + verify_cache_window());
            self.state.mark_verified(now);
        }

        if self.state.is_privileged(request.action_key) {
            if self.state.is_session_allowed(request.action_key) {
                return GateDecision::Approved;
            }
            if let Some(passphrase) = self.state.passphrase() {
                if !request.transcript.contains(passphrase) {
                    return self.hold(request, PendingReason::MissingPassphrase);
                }
            }
        }

        GateDecision::Approved
    }

    /// Release the pending action, applying the requested overrides
    ///
    /// Returns the released action for dispatch, or `None` when nothing was pending.
    pub fn confirm(&mut self, options: ConfirmOptions) -> Option<PendingConfirmation> {
        let pending = self.pending.take()?;
        if options.remember_action_for_session {
            self.state.allow_for_session(&pending.action_key);
        }
        if options.extend_verify_window {
            self.state.mark_verified(self.clock.now());
        }
        tracing::info!("Confirmed pending voice action {}", pending.action_key);
        Some(pending)
    }

    /// Drop the pending action without running it; safe to call repeatedly
    pub fn cancel(&mut self) -> Option<PendingConfirmation> {
        let cancelled = self.pending.take();
        if let Some(ref p) = cancelled {
            tracing::info!("Cancelled pending voice action {}", p.action_key);
        }
        cancelled
    }

    fn hold(&mut self, request: GateRequest<'_>, reason: PendingReason) -> GateDecision {
        tracing::info!(
            action_key = request.action_key,
            reason = reason.message(),
            "Voice action held for confirmation"
        );
        self.pending = Some(PendingConfirmation {
            action_key: request.action_key.to_string(),
            action_name: request.action_name.to_string(),
            reason,
        });
        GateDecision::from_reason(reason)
    }
}
