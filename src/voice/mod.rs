//! Voice commands
//!
//! Recognized speech is normalized, matched against the user's prompts,
//! recorded in history and checked by the security gate before the matched
//! action is dispatched. [`VoiceService`] wires these steps together; the
//! speech engine, the verification backend, the action targets and the toast
//! surface are collaborators behind traits.

pub mod capture;
pub mod clock;
pub mod dispatch;
pub mod history;
pub mod jobs;
pub mod matcher;
pub mod normalize;
pub mod notify;
pub mod prompts;
pub mod security;
pub mod verification;

mod service;
mod types;

pub use capture::{NoCapture, SpeechCapture};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dispatch::{ActionDispatcher, AppAction, AppDispatcher, DispatchOutcome, JobApi, Navigator};
pub use history::HistoryLedger;
pub use jobs::{HttpJobApi, NoJobApi};
pub use matcher::match_prompt;
pub use normalize::normalize;
pub use notify::{LogNotifier, Notifier, PRIVILEGED_TOAST};
pub use prompts::{PromptError, PromptStore};
pub use security::{ConfirmOptions, GateDecision, PendingConfirmation, PendingReason, SecurityGate};
pub use service::{Collaborators, VoiceService};
pub use types::{ListenError, Recognition, VoiceEvent};
pub use verification::{HttpVerificationBackend, VoiceSecurity, VoiceVerifier};
