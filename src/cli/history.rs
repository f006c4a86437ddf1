//! History commands

use std::sync::Arc;

use anyhow::Result;

use aimate_voice::voice::NoCapture;
use aimate_voice::HistoryEntry;

use super::CliContext;

/// Show history, most recent first
pub async fn show_command(ctx: &CliContext, json: bool) -> Result<()> {
    let service = ctx.service(Arc::new(NoCapture)).await?;
    let entries: Vec<&HistoryEntry> = service.history().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No voice history (keeping up to {} entries).", service.history_max());
        return Ok(());
    }

    println!("History ({} of max {}):\n", entries.len(), service.history_max());
    for entry in entries {
        let action = match (&entry.action_name, &entry.action_key) {
            (Some(name), Some(key)) => format!("{} ({})", name, key),
            (Some(name), None) => name.clone(),
            (None, Some(key)) => key.clone(),
            (None, None) => "no match".to_string(),
        };
        println!(
            "  {}  \"{}\" -> {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.transcript,
            action
        );
    }

    Ok(())
}

/// Remove every history entry
pub async fn clear_command(ctx: &CliContext) -> Result<()> {
    let mut service = ctx.service(Arc::new(NoCapture)).await?;
    service.clear_history().await;
    println!("Voice history cleared.");
    Ok(())
}

/// Change how many entries are kept
pub async fn max_command(ctx: &CliContext, value: i64) -> Result<()> {
    let mut service = ctx.service(Arc::new(NoCapture)).await?;
    let max = service.set_history_max(value).await;
    if max as i64 != value {
        println!("History size clamped to {}.", max);
    } else {
        println!("History size set to {}.", max);
    }
    Ok(())
}
