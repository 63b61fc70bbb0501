//! Orchestrator: the top-level state container.
//!
//! [`AppState`] holds everything the views read (selected file, prompt list,
//! loading flag, output). It is a plain owned value with explicit transition
//! methods, so it can be tested without a network.
//! [`Orchestrator`] wires it to the [`ApiClient`], the preview panel and a
//! [`Notifier`].
//!
//! ## Parse lifecycle
//!
//! ```text
//! idle ──handle_parse──▶ loading ──ok──▶ has_output
//!                            └────err──▶ idle (notified)
//! ```
//!
//! A 2xx body with `"success": false` takes the error branch.
//!
//! No partial-progress states. The loading flag is the only guard against
//! duplicate submissions; nothing is cancelled or timed out.

use crate::client::ApiClient;
use crate::document::SelectedFile;
use crate::error::DotOcrError;
use crate::notify::{NoopNotifier, Notification, SharedNotifier};
use crate::output::OutputPanel;
use crate::preview::PreviewPanel;
use crate::prompts::{default_prompt_id, find_prompt};
use crate::types::{ParseResponse, Prompt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shown when a parse error carries no message of its own.
pub const PARSE_FAILED_FALLBACK: &str = "An unexpected error occurred while parsing.";
/// Shown when loading prompts fails without a message.
pub const PROMPTS_FAILED_FALLBACK: &str = "Failed to load prompts.";
pub const PARSE_SUCCEEDED: &str = "Document parsed successfully!";

/// Observable UI state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub selected_file: Option<SelectedFile>,
    pub selected_prompt: Option<String>,
    pub prompts: Vec<Prompt>,
    pub is_loading: bool,
    pub has_output: bool,
    pub output_data: Option<ParseResponse>,
}

impl AppState {
    /// New selection invalidates any previous output.
    pub fn select_file(&mut self, file: SelectedFile) {
        debug!("Selected file '{}'", file.name);
        self.selected_file = Some(file);
        self.has_output = false;
        self.output_data = None;
    }

    /// Select a prompt from the loaded list.
    pub fn select_prompt(&mut self, id: &str) -> Result<(), DotOcrError> {
        if find_prompt(&self.prompts, id).is_none() {
            return Err(DotOcrError::InvalidRequest(format!("unknown prompt '{id}'")));
        }
        self.selected_prompt = Some(id.to_string());
        Ok(())
    }

    /// Store a freshly fetched prompt list, pre-selecting the first entry
    /// unless the current selection is still valid.
    pub fn set_prompts(&mut self, prompts: Vec<Prompt>) {
        let keep = self
            .selected_prompt
            .as_deref()
            .is_some_and(|id| find_prompt(&prompts, id).is_some());
        if !keep {
            self.selected_prompt = default_prompt_id(&prompts).map(String::from);
        }
        self.prompts = prompts;
    }

    /// File selected, non-empty prompt selected, nothing in flight.
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some()
            && self
                .selected_prompt
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty())
            && !self.is_loading
    }

    /// Why [`can_submit`](Self::can_submit) is false, if it is.
    pub fn submit_blocker(&self) -> Option<&'static str> {
        if self.is_loading {
            Some("a parse is already in progress")
        } else if self.selected_file.is_none() {
            Some("no file selected")
        } else if !self.can_submit() {
            Some("no prompt selected")
        } else {
            None
        }
    }

    pub fn begin_parse(&mut self) {
        self.is_loading = true;
        self.has_output = false;
        self.output_data = None;
    }

    pub fn finish_success(&mut self, response: ParseResponse) {
        self.output_data = Some(response);
        self.has_output = true;
        self.is_loading = false;
    }

    pub fn finish_failure(&mut self) {
        self.is_loading = false;
        self.has_output = false;
        self.output_data = None;
    }
}

/// Top-level controller owning the state and the child panels.
pub struct Orchestrator {
    client: ApiClient,
    state: AppState,
    preview: PreviewPanel,
    notifier: SharedNotifier,
}

impl Orchestrator {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: AppState::default(),
            preview: PreviewPanel::new(),
            notifier: Arc::new(NoopNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: SharedNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn preview(&self) -> &PreviewPanel {
        &self.preview
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Output view over the last successful parse.
    pub fn output_panel(&self) -> Option<OutputPanel<'_>> {
        self.state.output_data.as_ref().map(OutputPanel::new)
    }

    /// Fetch prompts from the service. Failures are notified and returned;
    /// the state is left untouched.
    pub async fn load_prompts(&mut self) -> Result<&[Prompt], DotOcrError> {
        match self.client.get_prompts().await {
            Ok(prompts) => {
                info!("Loaded {} prompts", prompts.len());
                self.state.set_prompts(prompts);
                Ok(&self.state.prompts)
            }
            Err(e) => {
                warn!("Failed to load prompts: {}", e);
                self.notifier
                    .notify(&Notification::error(e.user_message(PROMPTS_FAILED_FALLBACK)));
                Err(e)
            }
        }
    }

    pub fn select_prompt(&mut self, id: &str) -> Result<(), DotOcrError> {
        self.state.select_prompt(id)
    }

    /// Select a file and refresh the preview.
    ///
    /// A preview failure is logged and leaves the preview empty; it never
    /// blocks the selection itself.
    pub async fn select_file(&mut self, file: SelectedFile) {
        if let Err(e) = self.preview.show(&file).await {
            warn!("Preview unavailable for '{}': {}", file.name, e);
            self.preview.clear();
        }
        self.state.select_file(file);
    }

    /// Submit the selected file with the selected prompt.
    pub async fn handle_parse(&mut self) -> Result<&ParseResponse, DotOcrError> {
        if let Some(reason) = self.state.submit_blocker() {
            return Err(DotOcrError::InvalidRequest(reason.to_string()));
        }

        self.state.begin_parse();
        let result = match (&self.state.selected_file, &self.state.selected_prompt) {
            (Some(file), Some(prompt)) => self.client.parse_document(file, prompt).await,
            _ => Err(DotOcrError::Internal("selection vanished during parse".into())),
        };
        let result = match result {
            Ok(response) if !response.success => Err(DotOcrError::ParseUnsuccessful),
            other => other,
        };

        match result {
            Ok(response) => {
                self.state.finish_success(response);
                self.notifier.notify(&Notification::success(PARSE_SUCCEEDED));
                self.state
                    .output_data
                    .as_ref()
                    .ok_or_else(|| DotOcrError::Internal("output missing after parse".into()))
            }
            Err(e) => {
                warn!("Parse failed: {}", e);
                self.state.finish_failure();
                self.notifier
                    .notify(&Notification::error(e.user_message(PARSE_FAILED_FALLBACK)));
                Err(e)
            }
        }
    }
}
