//! Core domain types for AI Mate voice commands

mod history;
mod prompt;

pub use history::{clamp_history_max, HistoryEntry, DEFAULT_HISTORY_MAX, HISTORY_MAX_LIMIT};
pub use prompt::VoicePrompt;
