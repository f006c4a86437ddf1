//! Security Gate - decides whether a matched voice action may run now
//!
//! Every execution request passes the same checks in fixed order:
//! 1. rate limit (sliding window)
//! 2. voice verification, when enforcement is enabled (cached for a while)
//! 3. passphrase for privileged actions, unless remembered for the session
//!
//! A failed check parks the action in a single pending-confirmation slot that
//! the user confirms or cancels. Checks never return errors.

mod gate;
mod pending;
mod rate_limit;
mod state;


use std::collections::HashSet;

use chrono::Duration;

use crate::domain::VoicePrompt;

pub use gate::{GateDecision, GateRequest, SecurityGate};
pub use pending::{ConfirmOptions, PendingConfirmation, PendingReason};
pub use rate_limit::RateLimiter;
pub use state::SecurityState;

/// Executions allowed inside one rate-limit window before blocking
pub const RATE_LIMIT_COUNT: usize = 3;

/// Length of the rate-limit sliding window
pub fn rate_limit_window() -> Duration {
    Duration::seconds(10)
}

/// How long a successful voice verification is reused
pub fn verify_cache_window() -> Duration {
    Duration::minutes(5)
}

/// Action keys that need authorization, lower-cased
///
/// Prompts flagged privileged always count. With `auto_privilege_create`
/// every `create_*` key is privileged as well.
pub fn derive_privileged_keys(prompts: &[VoicePrompt], auto_privilege_create: bool) -> HashSet<String> {
    prompts
        .iter()
        .filter_map(|p| {
            let key = p.action_key.as_deref()?.trim();
            if key.is_empty() {
                return None;
            }
            let key = key.to_lowercase();
            let auto = auto_privilege_create && key.starts_with("create_");
            (p.privileged || auto).then_some(key)
        })
        .collect()
}
