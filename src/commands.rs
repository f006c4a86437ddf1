//! CLI command definitions for aimate-voice.

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Manage phrase to action prompts
    Prompts {
        #[command(subcommand)]
        command: PromptCommands,
    },

    /// Run one transcript through matching (and optionally the security gate)
    Simulate {
        /// Text as it would have been heard
        text: String,
        /// Execute the matched action instead of only recording it
        #[arg(long)]
        execute: bool,
    },

    /// Run an action by key, still subject to the security gate
    Run {
        /// Action key (e.g., show_jobs)
        action_key: String,
    },

    /// Treat each line on stdin as a recognized transcript (Ctrl-C stops)
    Listen,

    /// Show or change the recognition history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Passphrase, verification and notification settings
    Security {
        #[command(subcommand)]
        command: SecurityCommands,
    },

    /// Write prompts and history as JSON (stdout when no file is given)
    Export { file: Option<PathBuf> },

    /// Restore prompts and history from an export
    Import { file: PathBuf },

    /// Initialize a new ~/.aimate/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum PromptCommands {
    /// List prompts in match order
    List {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Add a prompt at the end of the list
    Add {
        /// Trigger phrase (e.g., "show jobs")
        phrase: String,
        /// Action key (e.g., show_jobs)
        action_key: String,
        /// Display name (defaults to the action key)
        #[arg(long)]
        name: Option<String>,
        /// Require the passphrase for this action
        #[arg(long)]
        privileged: bool,
        /// Add the prompt hidden from matching
        #[arg(long)]
        hidden: bool,
    },
    /// Remove a prompt by id
    Remove { id: String },
    /// Hide or unhide a prompt
    Hide {
        id: String,
        /// Make the prompt visible again
        #[arg(long)]
        undo: bool,
    },
    /// Mark or unmark a prompt as privileged
    Privilege {
        id: String,
        /// Remove the privileged flag
        #[arg(long)]
        undo: bool,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Show history, most recent first
    Show {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Remove every history entry
    Clear,
    /// Set how many entries are kept (0-50)
    Max {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
}

#[derive(Subcommand)]
pub enum SecurityCommands {
    /// Show the current security settings
    Status,
    /// Set the passphrase for privileged actions (omit to remove it)
    Passphrase { text: Option<String> },
    /// Treat every create_* action as privileged
    AutoPrivilege {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Require voice verification before running actions
    Enforce {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Show a notification after privileged actions
    Toasts {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Capture a voice sample and enroll it
    Enroll,
    /// Forget every enrolled voice sample
    ClearEnrollment,
}
