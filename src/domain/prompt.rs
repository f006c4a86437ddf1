use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined mapping from a spoken phrase to an app action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicePrompt {
    /// Unique id (32 hex chars); empty for entries stored without one
    /// until storage assigns it
    #[serde(default)]
    pub id: String,

    /// Human-friendly name of the action (e.g., "Create Invoice")
    #[serde(default)]
    pub action_name: Option<String>,

    /// Stable key used for routing (e.g., "create_invoice")
    #[serde(default)]
    pub action_key: Option<String>,

    /// Trigger text as spoken or typed by the user
    #[serde(default)]
    pub phrase: Option<String>,

    /// Hidden prompts are never matched
    #[serde(default)]
    pub hidden: bool,

    /// Privileged prompts need a passphrase or a session override
    #[serde(default)]
    pub privileged: bool,
}

fn new_prompt_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl VoicePrompt {
    /// Create a visible, unprivileged prompt with a fresh id
    pub fn new(
        action_name: impl Into<String>,
        action_key: impl Into<String>,
        phrase: impl Into<String>,
    ) -> Self {
        Self {
            id: new_prompt_id(),
            action_name: Some(action_name.into()),
            action_key: Some(action_key.into()),
            phrase: Some(phrase.into()),
            hidden: false,
            privileged: false,
        }
    }

    /// Use a fixed id instead of the generated one
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Mark the prompt as hidden
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark the prompt as privileged
    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    /// Give an id-less prompt a fresh id; `true` when one was assigned
    pub fn ensure_id(&mut self) -> bool {
        if !self.id.trim().is_empty() {
            return false;
        }
        self.id = new_prompt_id();
        true
    }

    pub fn action_key_str(&self) -> &str {
        self.action_key.as_deref().unwrap_or_default()
    }

    pub fn action_name_str(&self) -> &str {
        self.action_name.as_deref().unwrap_or_default()
    }

    pub fn phrase_str(&self) -> &str {
        self.phrase.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prompt_gets_simple_uuid() {
        let a = VoicePrompt::new("Show Jobs", "show_jobs", "show jobs");
        let b = VoicePrompt::new("Show Jobs", "show_jobs", "show jobs");
        assert_eq!(a.id.len(), 32);
        assert!(a.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn deserializes_original_camel_case_layout() {
        let json = r#"{"id":"abc","actionName":"Create Job","actionKey":"create_job","phrase":"new job","hidden":false,"privileged":true}"#;
        let prompt: VoicePrompt = serde_json::from_str(json).unwrap();
        assert_eq!(prompt.id, "abc");
        assert_eq!(prompt.action_key_str(), "create_job");
        assert!(prompt.privileged);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let prompt: VoicePrompt = serde_json::from_str(r#"{"phrase":"hello"}"#).unwrap();
        assert!(prompt.id.is_empty());
        assert!(prompt.action_key.is_none());
        assert!(!prompt.hidden);
        assert_eq!(prompt.action_name_str(), "");
    }

    #[test]
    fn ensure_id_only_fills_blank_ids() {
        let mut stored: VoicePrompt = serde_json::from_str(r#"{"phrase":"hello"}"#).unwrap();
        assert!(stored.ensure_id());
        assert_eq!(stored.id.len(), 32);

        let assigned = stored.id.clone();
        assert!(!stored.ensure_id());
        assert_eq!(stored.id, assigned);
    }
}
