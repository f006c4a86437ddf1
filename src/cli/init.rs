//! Init command implementation

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use aimate_voice::config::Config;

/// Default configuration content for aimate-voice init
pub const DEFAULT_CONFIG: &str = r#"# AI Mate Voice Configuration
# ===========================

# Where prompts, history and security flags are stored
[storage]
# path = "/home/me/.aimate/voice.db"

# Invoicing backend used by actions with side effects (create_job)
[api]
# base_url = "http://localhost:5000"

# Speaker verification
#
#   backend_url         - Verification service; when unset samples are compared locally
#   timeout_secs        - Connect/read timeout for backend calls (default: 5)
#   verify_sample_secs  - Sample length when verifying (default: 2)
#   enroll_sample_secs  - Sample length when enrolling (default: 3)
[verification]
# backend_url = "http://localhost:5000"
timeout_secs = 5
verify_sample_secs = 2
enroll_sample_secs = 3

# Voice commands
#
#   default_history_max - History entries kept until changed with `history max` (0-50)
[voice]
default_history_max = 10
"#;

/// Write the default configuration file
pub async fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created: {}", config_path.display());

    Ok(())
}
