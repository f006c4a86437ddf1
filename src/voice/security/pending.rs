use serde::{Deserialize, Serialize};

/// Why an action is waiting for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingReason {
    RateLimited,
    VerificationFailed,
    MissingPassphrase,
}

impl PendingReason {
    /// Text shown next to the Confirm/Cancel choice
    pub fn message(&self) -> &'static str {
        match self {
            PendingReason::RateLimited => "Rate limited. Confirm to proceed.",
            PendingReason::VerificationFailed => "Voice verification failed. Confirm to proceed.",
            PendingReason::MissingPassphrase => "Missing security passphrase. Confirm to proceed.",
        }
    }
}

impl std::fmt::Display for PendingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// An action blocked by the gate, awaiting confirm or cancel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub action_key: String,
    pub action_name: String,
    pub reason: PendingReason,
}

/// Extra effects of confirming a pending action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmOptions {
    /// Treat the voice as freshly verified from now on
    pub extend_verify_window: bool,
    /// Skip the passphrase for this action key for the rest of the session
    pub remember_action_for_session: bool,
}
