//! Simulate command implementation

use std::sync::Arc;

use anyhow::Result;

use super::stdin::StdinCapture;
use super::{print_recognition, CliContext};

/// Run one transcript through the pipeline
pub async fn simulate_command(ctx: &CliContext, text: &str, execute: bool) -> Result<()> {
    let mut service = ctx.service(Arc::new(StdinCapture::new())).await?;

    match service.simulate_recognition(text, execute).await {
        Some(recognition) => print_recognition(&recognition, &service),
        None => println!("Nothing heard."),
    }

    if service.pending().is_some() {
        println!("  Pending actions only live for one session; use `listen` to confirm them.");
    }
    Ok(())
}
