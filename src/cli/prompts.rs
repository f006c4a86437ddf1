//! Prompt commands (edit the phrase to action list)

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use aimate_voice::voice::{AppAction, NoCapture};
use aimate_voice::VoicePrompt;

use super::CliContext;

/// List prompts in match order
pub async fn list_command(ctx: &CliContext, json: bool) -> Result<()> {
    let service = ctx.service(Arc::new(NoCapture)).await?;
    let prompts = service.prompts().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&prompts)?);
        return Ok(());
    }

    if prompts.is_empty() {
        println!("No prompts configured.");
        return Ok(());
    }

    println!("Prompts ({}):\n", prompts.len());
    for (i, prompt) in prompts.iter().enumerate() {
        let mut flags = Vec::new();
        if prompt.hidden {
            flags.push("hidden");
        }
        if service.is_privileged(prompt.action_key_str()) {
            flags.push("privileged");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        println!(
            "  {}. \"{}\" -> {} ({}){}",
            i + 1,
            prompt.phrase_str(),
            prompt.action_name_str(),
            prompt.action_key_str(),
            flags
        );
        println!("     id: {}", prompt.id);
    }

    Ok(())
}

/// Append a prompt
pub async fn add_command(
    ctx: &CliContext,
    phrase: String,
    action_key: String,
    name: Option<String>,
    privileged: bool,
    hidden: bool,
) -> Result<()> {
    if phrase.trim().is_empty() {
        bail!("Phrase must not be empty");
    }
    let action_key = action_key.trim().to_string();
    if AppAction::from_key(&action_key).is_none() {
        eprintln!("Note: '{}' is not a known action; matching it will do nothing.", action_key);
    }

    let name = name.unwrap_or_else(|| action_key.clone());
    let mut prompt = VoicePrompt::new(name, action_key, phrase);
    prompt.privileged = privileged;
    prompt.hidden = hidden;
    let id = prompt.id.clone();

    let mut service = ctx.service(Arc::new(NoCapture)).await?;
    service.add_prompt(prompt).await.context("Failed to add prompt")?;
    println!("Added prompt {}", id);
    Ok(())
}

/// Remove a prompt by id
pub async fn remove_command(ctx: &CliContext, id: &str) -> Result<()> {
    let mut service = ctx.service(Arc::new(NoCapture)).await?;
    if service.remove_prompt(id).await.context("Failed to remove prompt")? {
        println!("Removed prompt {}", id);
    } else {
        eprintln!("No prompt with id '{}'", id);
    }
    Ok(())
}

/// Hide a prompt from matching, or show it again
pub async fn hide_command(ctx: &CliContext, id: &str, hidden: bool) -> Result<()> {
    edit_prompt(ctx, id, |p| p.hidden = hidden).await?;
    println!("Prompt {} is now {}", id, if hidden { "hidden" } else { "visible" });
    Ok(())
}

/// Set or clear the privileged flag of a prompt
pub async fn privilege_command(ctx: &CliContext, id: &str, privileged: bool) -> Result<()> {
    edit_prompt(ctx, id, |p| p.privileged = privileged).await?;
    println!(
        "Prompt {} is now {}",
        id,
        if privileged { "privileged" } else { "unprivileged" }
    );
    Ok(())
}

async fn edit_prompt(ctx: &CliContext, id: &str, edit: impl FnOnce(&mut VoicePrompt)) -> Result<()> {
    let mut service = ctx.service(Arc::new(NoCapture)).await?;
    let Some(mut prompt) = service.prompts().await.into_iter().find(|p| p.id == id) else {
        bail!("No prompt with id '{}'", id);
    };
    edit(&mut prompt);
    service.update_prompt(prompt).await.context("Failed to update prompt")?;
    Ok(())
}
