//! Voice verification - is the speaker the enrolled user?
//!
//! Samples come from the speech capture collaborator. The remote backend is
//! asked first; if it cannot be reached the sample is compared locally with a
//! length heuristic.

mod backend;
mod heuristic;


use std::sync::Arc;

use async_trait::async_trait;

use crate::store::{StoreError, VoiceStorage};
use crate::voice::capture::SpeechCapture;

pub use backend::{HttpVerificationBackend, VerificationBackend, VerifyError, VerifyResponse};
pub use heuristic::{FALLBACK_THRESHOLD, length_similarity, matches_enrolled};

/// What the security gate needs from verification
#[async_trait]
pub trait VoiceVerifier: Send + Sync {
    /// Whether verification is required before running actions
    async fn is_enforced(&self) -> bool;

    /// Capture a sample and compare it with the enrolled voice
    async fn verify(&self) -> bool;
}

/// Sample durations used for capture
#[derive(Debug, Clone, Copy)]
pub struct SampleDurations {
    pub verify_secs: u32,
    pub enroll_secs: u32,
}

impl Default for SampleDurations {
    fn default() -> Self {
        Self {
            verify_secs: 2,
            enroll_secs: 3,
        }
    }
}

/// Enrollment and verification against stored samples
pub struct VoiceSecurity {
    storage: VoiceStorage,
    capture: Arc<dyn SpeechCapture>,
    backend: Option<Arc<dyn VerificationBackend>>,
    durations: SampleDurations,
}

impl VoiceSecurity {
    pub fn new(storage: VoiceStorage, capture: Arc<dyn SpeechCapture>) -> Self {
        Self {
            storage,
            capture,
            backend: None,
            durations: SampleDurations::default(),
        }
    }

    pub fn with_backend(mut self, backend: Arc<dyn VerificationBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_durations(mut self, durations: SampleDurations) -> Self {
        self.durations = durations;
        self
    }

    pub async fn set_enforced(&self, enforce: bool) -> Result<(), StoreError> {
        self.storage.set_voice_enforce(enforce).await
    }

    pub async fn is_enrolled(&self) -> bool {
        !self.storage.enrollment().await.is_empty()
    }

    /// Capture one sample and enroll it
    ///
    /// The backend keeps the sample when reachable; otherwise it is appended
    /// to the locally stored samples. Call repeatedly to add more samples.
    pub async fn enroll(&self) -> bool {
        let Some(sample) = self.capture_sample(self.durations.enroll_secs).await else {
            return false;
        };

        if let Some(backend) = &self.backend {
            match backend.enroll(&sample).await {
                Ok(()) => return true,
                Err(e) => tracing::warn!("Backend enrollment failed, storing sample locally: {}", e),
            }
        }

        let mut samples = self.storage.enrollment().await;
        samples.push(sample);
        match self.storage.set_enrollment(&samples).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to store voice sample: {}", e);
                false
            }
        }
    }

    pub async fn clear_enrollment(&self) -> Result<(), StoreError> {
        self.storage.set_enrollment(&[]).await
    }

    async fn capture_sample(&self, seconds: u32) -> Option<String> {
        self.capture
            .record_once(seconds)
            .await
            .filter(|s| !s.trim().is_empty())
    }
}

#[async_trait]
impl VoiceVerifier for VoiceSecurity {
    async fn is_enforced(&self) -> bool {
        self.storage.voice_enforce().await
    }

    async fn verify(&self) -> bool {
        let enrolled = self.storage.enrollment().await;
        if enrolled.is_empty() {
            tracing::debug!("Voice verification enforced but nothing enrolled");
            return false;
        }

        let Some(sample) = self.capture_sample(self.durations.verify_secs).await else {
            tracing::debug!("No voice sample captured for verification");
            return false;
        };

        if let Some(backend) = &self.backend {
            match backend.verify(&sample).await {
                Ok(response) => {
                    tracing::debug!("Backend verification ok={} score={:.2}", response.ok, response.score);
                    return response.ok;
                }
                Err(e) => tracing::warn!("Verification backend unavailable, using local check: {}", e),
            }
        }

        matches_enrolled(&sample, &enrolled)
    }
}
