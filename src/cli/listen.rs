//! Listen command - interactive recognition session on stdin

use std::sync::Arc;

use anyhow::{Context, Result};

use aimate_voice::voice::{ConfirmOptions, VoiceService};

use super::stdin::StdinCapture;
use super::{print_recognition, CliContext};

/// Treat every stdin line as recognized speech until Ctrl-C or end of input
pub async fn listen_command(ctx: &CliContext) -> Result<()> {
    let capture = Arc::new(StdinCapture::new());
    let mut service = ctx.service(capture.clone()).await?;

    let mut transcripts = service
        .start_listening()
        .await
        .context("Failed to start listening")?;
    println!("Listening. Type what you would say; Ctrl-C to stop.");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = capture.next_line() => {
                let Some(line) = line else { break };
                capture.hear(line);
            }
        }

        while let Ok(transcript) = transcripts.try_recv() {
            if let Some(recognition) = service.on_transcript_received(&transcript).await {
                print_recognition(&recognition, &service);
            }
            if service.pending().is_some() {
                resolve_pending(&mut service, &capture).await;
            }
        }
    }

    service.stop_listening().await;
    println!("Stopped listening.");
    Ok(())
}

/// Ask the user what to do with the held action
async fn resolve_pending(service: &mut VoiceService, capture: &StdinCapture) {
    println!(
        "  Confirm? [y] yes, [s] remember action for this session, [v] trust my voice for 5 minutes, anything else cancels"
    );
    let answer = capture.next_line().await.unwrap_or_default();

    let options = match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => ConfirmOptions::default(),
        "s" => ConfirmOptions {
            remember_action_for_session: true,
            ..Default::default()
        },
        "v" => ConfirmOptions {
            extend_verify_window: true,
            ..Default::default()
        },
        _ => {
            service.cancel_pending();
            println!("  Cancelled");
            return;
        }
    };

    if let Some(outcome) = service.confirm_pending(options).await {
        println!("  Confirmed ({:?})", outcome);
    }
}
