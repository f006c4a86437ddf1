//! Security commands (passphrase, verification, notifications)

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use aimate_voice::voice::{NoCapture, VoiceVerifier};

use super::stdin::StdinCapture;
use super::CliContext;

/// Show the current security settings
pub async fn status_command(ctx: &CliContext) -> Result<()> {
    let service = ctx.service(Arc::new(NoCapture)).await?;
    let storage = service.storage();
    let security = ctx.voice_security(storage.clone(), Arc::new(NoCapture));

    let mut privileged: Vec<&str> = service.security_state().privileged_keys().collect();
    privileged.sort_unstable();

    println!("Config:            {}", ctx.config_path.display());
    println!("Database:          {}", ctx.db_path.display());
    println!("Passphrase:        {}", if service.has_passphrase() { "set" } else { "not set" });
    println!("Auto-privilege:    {}", on_off(storage.auto_privilege_create().await));
    println!("Voice enforcement: {}", on_off(security.is_enforced().await));
    println!("Voice enrolled:    {}", if security.is_enrolled().await { "yes" } else { "no" });
    println!(
        "Verification:      {}",
        ctx.config.verification.backend_url().unwrap_or("local comparison only")
    );
    println!("Toasts:            {}", on_off(storage.toasts_enabled().await));
    if privileged.is_empty() {
        println!("Privileged:        none");
    } else {
        println!("Privileged:        {}", privileged.join(", "));
    }
    Ok(())
}

/// Set or remove the passphrase for privileged actions
pub async fn passphrase_command(ctx: &CliContext, text: Option<&str>) -> Result<()> {
    let mut service = ctx.service(Arc::new(NoCapture)).await?;
    service
        .set_passphrase(text)
        .await
        .context("Failed to store passphrase")?;

    if service.has_passphrase() {
        println!("Passphrase set. Say it together with privileged commands.");
    } else {
        println!("Passphrase removed.");
    }
    Ok(())
}

pub async fn auto_privilege_command(ctx: &CliContext, enabled: bool) -> Result<()> {
    let mut service = ctx.service(Arc::new(NoCapture)).await?;
    service
        .set_auto_privilege_create(enabled)
        .await
        .context("Failed to store auto-privilege setting")?;
    println!("Auto-privilege for create_* actions: {}", on_off(enabled));
    Ok(())
}

pub async fn enforce_command(ctx: &CliContext, enabled: bool) -> Result<()> {
    let storage = ctx.storage()?;
    let security = ctx.voice_security(storage, Arc::new(NoCapture));
    if enabled && !security.is_enrolled().await {
        eprintln!("Warning: no voice enrolled; every action will need confirmation.");
    }
    security
        .set_enforced(enabled)
        .await
        .context("Failed to store enforcement setting")?;
    println!("Voice verification: {}", on_off(enabled));
    Ok(())
}

pub async fn toasts_command(ctx: &CliContext, enabled: bool) -> Result<()> {
    let storage = ctx.storage()?;
    storage
        .set_toasts_enabled(enabled)
        .await
        .context("Failed to store toast setting")?;
    println!("Privileged action toasts: {}", on_off(enabled));
    Ok(())
}

/// Capture one sample and enroll it
pub async fn enroll_command(ctx: &CliContext) -> Result<()> {
    let storage = ctx.storage()?;
    let security = ctx.voice_security(storage, Arc::new(StdinCapture::new()));
    if !security.enroll().await {
        bail!("No voice sample captured");
    }
    println!("Voice sample enrolled.");
    Ok(())
}

pub async fn clear_enrollment_command(ctx: &CliContext) -> Result<()> {
    let storage = ctx.storage()?;
    let security = ctx.voice_security(storage, Arc::new(NoCapture));
    security
        .clear_enrollment()
        .await
        .context("Failed to clear enrollment")?;
    println!("Enrolled voice samples removed.");
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
