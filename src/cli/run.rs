//! Run command implementation

use std::sync::Arc;

use anyhow::{bail, Result};

use super::stdin::StdinCapture;
use super::{print_decision, CliContext};

/// Run an action by key through the security gate
pub async fn run_command(ctx: &CliContext, action_key: &str) -> Result<()> {
    let mut service = ctx.service(Arc::new(StdinCapture::new())).await?;

    let Some(decision) = service.run_action(action_key).await else {
        bail!("Action key must not be empty");
    };
    println!("Run: {}", action_key.trim());
    print_decision(decision, &service);
    Ok(())
}
