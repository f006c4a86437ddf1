//! Prompt Store - the user's phrase to action mappings
//!
//! Prompts are kept in insertion order because matching is first-match-wins.
//! Every mutation rewrites the whole list.

use thiserror::Error;

use crate::domain::VoicePrompt;
use crate::store::{StoreError, VoiceStorage};

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("a prompt with id '{0}' already exists")]
    DuplicateId(String),

    #[error("no prompt with id '{0}'")]
    UnknownId(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct PromptStore {
    storage: VoiceStorage,
}

impl PromptStore {
    pub fn new(storage: VoiceStorage) -> Self {
        Self { storage }
    }

    /// All prompts in stored order (empty when unreadable)
    pub async fn list(&self) -> Vec<VoicePrompt> {
        self.storage.prompts().await
    }

    pub async fn get(&self, id: &str) -> Option<VoicePrompt> {
        self.list().await.into_iter().find(|p| p.id == id)
    }

    /// Append a prompt; its id must not be in use
    pub async fn add(&self, prompt: VoicePrompt) -> Result<(), PromptError> {
        let mut prompts = self.list().await;
        if prompts.iter().any(|p| p.id == prompt.id) {
            return Err(PromptError::DuplicateId(prompt.id));
        }
        tracing::debug!("Adding voice prompt {} ({})", prompt.id, prompt.phrase_str());
        prompts.push(prompt);
        self.storage.save_prompts(&prompts).await?;
        Ok(())
    }

    /// Replace the prompt with the same id, keeping its position
    pub async fn update(&self, prompt: VoicePrompt) -> Result<(), PromptError> {
        let mut prompts = self.list().await;
        let slot = prompts
            .iter_mut()
            .find(|p| p.id == prompt.id)
            .ok_or_else(|| PromptError::UnknownId(prompt.id.clone()))?;
        *slot = prompt;
        self.storage.save_prompts(&prompts).await?;
        Ok(())
    }

    /// Remove a prompt; returns `false` when the id was not found
    pub async fn remove(&self, id: &str) -> Result<bool, PromptError> {
        let mut prompts = self.list().await;
        let before = prompts.len();
        prompts.retain(|p| p.id != id);
        if prompts.len() == before {
            return Ok(false);
        }
        self.storage.save_prompts(&prompts).await?;
        Ok(true)
    }

    /// Replace the whole list; ids must be unique
    pub async fn replace_all(&self, prompts: Vec<VoicePrompt>) -> Result<(), PromptError> {
        let mut seen = std::collections::HashSet::new();
        for prompt in &prompts {
            if !seen.insert(prompt.id.as_str()) {
                return Err(PromptError::DuplicateId(prompt.id.clone()));
            }
        }
        self.storage.save_prompts(&prompts).await?;
        Ok(())
    }
}
