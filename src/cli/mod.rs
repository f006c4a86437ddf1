//! CLI command implementations

pub mod backup;
pub mod history;
pub mod init;
pub mod listen;
pub mod prompts;
pub mod run;
pub mod security;
pub mod simulate;

mod context;
mod stdin;

pub use context::CliContext;

use aimate_voice::voice::{GateDecision, Recognition, VoiceService};

/// Print what happened to one transcript
pub(crate) fn print_recognition(recognition: &Recognition, service: &VoiceService) {
    println!("Heard: \"{}\"", recognition.normalized);
    match &recognition.matched {
        Some(prompt) => println!(
            "  Matched: {} ({})",
            prompt.action_name_str(),
            prompt.action_key_str()
        ),
        None => println!("  No matching prompt"),
    }
    if let Some(decision) = recognition.decision {
        print_decision(decision, service);
    }
}

/// Print a gate decision, with the pending reason when the action is held
pub(crate) fn print_decision(decision: GateDecision, service: &VoiceService) {
    match (decision, service.pending()) {
        (GateDecision::Approved, _) => println!("  Approved"),
        (_, Some(pending)) => println!("  Held: {} - {}", pending.action_key, pending.reason),
        (other, None) => println!("  {}", other),
    }
}
