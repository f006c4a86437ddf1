//! AI Mate Voice - voice commands for a small-business invoicing app
//!
//! Recognized speech is mapped to in-app actions through user-defined
//! prompts. Before an action runs it passes a security gate that rate-limits
//! executions, optionally verifies the speaker's voice and asks for a
//! passphrase on privileged actions.
//!
//! ## Pipeline
//!
//! 1. **Normalize** the transcript (lower-case, trimmed, single spaces)
//! 2. **Match** it against the prompt list (first match wins)
//! 3. **Record** the event in the bounded history
//! 4. **Gate** the matched action; a blocked action waits for Confirm/Cancel
//! 5. **Dispatch** the approved action to the app

pub mod config;
pub mod domain;
pub mod store;
pub mod voice;

pub use domain::*;
