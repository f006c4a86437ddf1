use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use super::{RATE_LIMIT_COUNT, RateLimiter, rate_limit_window};
use crate::voice::normalize::normalize;

/// Per-session security state
///
/// Only the passphrase and privileged keys come from storage; everything else
/// lives for the session. Key sets hold lower-cased keys so membership is
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct SecurityState {
    passphrase: Option<String>,
    privileged_keys: HashSet<String>,
    pub(super) rate_limiter: RateLimiter,
    pub(super) last_verified_at: Option<DateTime<Utc>>,
    session_allowed: HashSet<String>,
}

impl Default for SecurityState {
    fn default() -> Self {
        Self {
            passphrase: None,
            privileged_keys: HashSet::new(),
            rate_limiter: RateLimiter::new(RATE_LIMIT_COUNT, rate_limit_window()),
            last_verified_at: None,
            session_allowed: HashSet::new(),
        }
    }
}

impl SecurityState {
    /// Normalized passphrase, if one is configured
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref()
    }

    pub fn set_passphrase(&mut self, passphrase: Option<&str>) {
        self.passphrase = passphrase.map(normalize).filter(|p| !p.is_empty());
    }

    pub fn set_privileged_keys(&mut self, keys: impl IntoIterator<Item = String>) {
        self.privileged_keys = keys.into_iter().map(|k| k.to_lowercase()).collect();
    }

    pub fn is_privileged(&self, action_key: &str) -> bool {
        self.privileged_keys.contains(&action_key.to_lowercase())
    }

    pub fn privileged_keys(&self) -> impl Iterator<Item = &str> {
        self.privileged_keys.iter().map(String::as_str)
    }

    pub fn allow_for_session(&mut self, action_key: &str) {
        self.session_allowed.insert(action_key.to_lowercase());
    }

    pub fn is_session_allowed(&self, action_key: &str) -> bool {
        self.session_allowed.contains(&action_key.to_lowercase())
    }

    pub fn last_verified_at(&self) -> Option<DateTime<Utc>> {
        self.last_verified_at
    }

    /// Whether the last verification is younger than `window` at `now`
    pub fn verified_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.last_verified_at.is_some_and(|at| now - at < window)
    }

    pub fn mark_verified(&mut self, at: DateTime<Utc>) {
        self.last_verified_at = Some(at);
    }
}
