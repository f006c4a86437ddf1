//! Action Dispatcher - turns an approved action key into an app effect
//!
//! The service only calls the dispatcher after the security gate approved the
//! action. Unknown keys are ignored so prompts may point at actions that do not
//! exist yet.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Title used for jobs created by voice
pub const VOICE_JOB_TITLE: &str = "Untitled (Voice)";

/// Result of dispatching one action key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    Handled,
    Unknown,
}

#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    async fn dispatch(&self, action_key: &str) -> DispatchOutcome;
}

/// Actions the app knows how to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppAction {
    CreateInvoice,
    ShowPayments,
    ShowJobs,
    CreateJob,
    ShowQuotes,
    ShowClients,
    CreateQuote,
    ShowInvoices,
    ShowExpenses,
    ShowAssistant,
    ShowSettings,
}

impl AppAction {
    pub const ALL: [AppAction; 11] = [
        AppAction::CreateInvoice,
        AppAction::ShowPayments,
        AppAction::ShowJobs,
        AppAction::CreateJob,
        AppAction::ShowQuotes,
        AppAction::ShowClients,
        AppAction::CreateQuote,
        AppAction::ShowInvoices,
        AppAction::ShowExpenses,
        AppAction::ShowAssistant,
        AppAction::ShowSettings,
    ];

    /// Look up an action by its exact key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    pub fn key(&self) -> &'static str {
        match self {
            AppAction::CreateInvoice => "create_invoice",
            AppAction::ShowPayments => "show_payments",
            AppAction::ShowJobs => "show_jobs",
            AppAction::CreateJob => "create_job",
            AppAction::ShowQuotes => "show_quotes",
            AppAction::ShowClients => "show_clients",
            AppAction::CreateQuote => "create_quote",
            AppAction::ShowInvoices => "show_invoices",
            AppAction::ShowExpenses => "show_expenses",
            AppAction::ShowAssistant => "show_assistant",
            AppAction::ShowSettings => "show_settings",
        }
    }

    /// Page shown once the action ran
    pub fn route(&self) -> &'static str {
        match self {
            AppAction::CreateInvoice | AppAction::ShowInvoices => "/invoices",
            // Payments are listed on the expenses page
            AppAction::ShowPayments | AppAction::ShowExpenses => "/expenses",
            AppAction::ShowJobs | AppAction::CreateJob => "/jobs",
            AppAction::ShowQuotes | AppAction::CreateQuote => "/quotes",
            AppAction::ShowClients => "/clients",
            AppAction::ShowAssistant => "/assistant",
            AppAction::ShowSettings => "/settings",
        }
    }
}

impl std::fmt::Display for AppAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Route sink, e.g. the UI router
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Business operations reachable by voice
#[async_trait]
pub trait JobApi: Send + Sync {
    async fn create_job(&self, title: &str) -> anyhow::Result<()>;
}

/// Default dispatcher over a navigator and the job API
pub struct AppDispatcher<N, J> {
    navigator: N,
    jobs: J,
}

impl<N: Navigator, J: JobApi> AppDispatcher<N, J> {
    pub fn new(navigator: N, jobs: J) -> Self {
        Self { navigator, jobs }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn jobs(&self) -> &J {
        &self.jobs
    }
}

#[async_trait]
impl<N: Navigator, J: JobApi> ActionDispatcher for AppDispatcher<N, J> {
    async fn dispatch(&self, action_key: &str) -> DispatchOutcome {
        let Some(action) = AppAction::from_key(action_key) else {
            tracing::debug!("Ignoring unknown voice action {}", action_key);
            return DispatchOutcome::Unknown;
        };

        if action == AppAction::CreateJob {
            if let Err(e) = self.jobs.create_job(VOICE_JOB_TITLE).await {
                tracing::warn!("Failed to create job from voice command: {}", e);
            }
        }

        self.navigator.navigate(action.route());
        DispatchOutcome::Handled
    }
}
