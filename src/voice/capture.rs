//! Speech capture collaborator
//!
//! Whatever owns the speech engine implements this trait. Recognition results
//! are pushed into a channel and handed to
//! [`VoiceService::on_transcript_received`](super::VoiceService::on_transcript_received)
//! by the owner of the receiving end.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

#[async_trait]
pub trait SpeechCapture: Send + Sync {
    /// Start continuous recognition, sending each final transcript
    ///
    /// Returns `false` when the engine is unavailable.
    async fn start_continuous(&self, transcripts: UnboundedSender<String>) -> bool;

    /// Stop continuous recognition
    async fn stop(&self);

    /// Capture one voice sample for enrollment or verification
    async fn record_once(&self, duration_secs: u32) -> Option<String>;
}

/// Capture used when no speech engine is present
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

#[async_trait]
impl SpeechCapture for NoCapture {
    async fn start_continuous(&self, _transcripts: UnboundedSender<String>) -> bool {
        tracing::debug!("No speech engine available for continuous listening");
        false
    }

    async fn stop(&self) {}

    async fn record_once(&self, _duration_secs: u32) -> Option<String> {
        None
    }
}
