//! Export and import of voice data

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use aimate_voice::voice::NoCapture;

use super::CliContext;

/// Write prompts, history and history size as JSON
pub async fn export_command(ctx: &CliContext, file: Option<&Path>) -> Result<()> {
    let service = ctx.service(Arc::new(NoCapture)).await?;
    let json = service.export_all().await.context("Failed to export voice data")?;

    match file {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Restore an export, replacing prompts and history
pub async fn import_command(ctx: &CliContext, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut service = ctx.service(Arc::new(NoCapture)).await?;
    if !service.import_all(&json).await.context("Failed to import voice data")? {
        bail!("{} is not a voice backup", file.display());
    }

    println!(
        "Imported {} prompts and {} history entries.",
        service.prompts().await.len(),
        service.history().count()
    );
    Ok(())
}
