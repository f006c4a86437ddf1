use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod cli;
mod commands;

use cli::CliContext;
use commands::{Commands, HistoryCommands, PromptCommands, SecurityCommands};

#[derive(Parser)]
#[command(name = "aimate-voice")]
#[command(about = "Voice commands for AI Mate - phrase matching with a security gate")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.aimate/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the voice database (overrides [storage] path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Init writes the config itself, so it must not load one first
    if let Commands::Init { force } = cli.command {
        return cli::init::init_command(cli.config, force).await;
    }

    let ctx = CliContext::load(cli.config, cli.db)?;

    match cli.command {
        Commands::Prompts { command } => match command {
            PromptCommands::List { json } => cli::prompts::list_command(&ctx, json).await?,
            PromptCommands::Add {
                phrase,
                action_key,
                name,
                privileged,
                hidden,
            } => {
                cli::prompts::add_command(&ctx, phrase, action_key, name, privileged, hidden).await?
            }
            PromptCommands::Remove { id } => cli::prompts::remove_command(&ctx, &id).await?,
            PromptCommands::Hide { id, undo } => cli::prompts::hide_command(&ctx, &id, !undo).await?,
            PromptCommands::Privilege { id, undo } => {
                cli::prompts::privilege_command(&ctx, &id, !undo).await?
            }
        },
        Commands::Simulate { text, execute } => {
            cli::simulate::simulate_command(&ctx, &text, execute).await?;
        }
        Commands::Run { action_key } => {
            cli::run::run_command(&ctx, &action_key).await?;
        }
        Commands::Listen => {
            cli::listen::listen_command(&ctx).await?;
        }
        Commands::History { command } => match command {
            HistoryCommands::Show { json } => cli::history::show_command(&ctx, json).await?,
            HistoryCommands::Clear => cli::history::clear_command(&ctx).await?,
            HistoryCommands::Max { value } => cli::history::max_command(&ctx, value).await?,
        },
        Commands::Security { command } => match command {
            SecurityCommands::Status => cli::security::status_command(&ctx).await?,
            SecurityCommands::Passphrase { text } => {
                cli::security::passphrase_command(&ctx, text.as_deref()).await?
            }
            SecurityCommands::AutoPrivilege { enabled } => {
                cli::security::auto_privilege_command(&ctx, enabled).await?
            }
            SecurityCommands::Enforce { enabled } => {
                cli::security::enforce_command(&ctx, enabled).await?
            }
            SecurityCommands::Toasts { enabled } => {
                cli::security::toasts_command(&ctx, enabled).await?
            }
            SecurityCommands::Enroll => cli::security::enroll_command(&ctx).await?,
            SecurityCommands::ClearEnrollment => {
                cli::security::clear_enrollment_command(&ctx).await?
            }
        },
        Commands::Export { file } => {
            cli::backup::export_command(&ctx, file.as_deref()).await?;
        }
        Commands::Import { file } => {
            cli::backup::import_command(&ctx, &file).await?;
        }
        Commands::Init { .. } => {}
    }

    Ok(())
}
