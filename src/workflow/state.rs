use serde::{Deserialize, Serialize};

use crate::models::{AnalysisResult, Artifact, GeoFix, OutputType, Thread};

/// Where the session sits in the check-in → capture → analyze → select →
/// draft → save flow. Errors never knock the machine out of its last
/// valid stage; they only fill the latest-error slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowStage {
    CheckingIn,
    Ready,
    Analyzing,
    ThreadsReady,
    Drafting,
    Saving,
    Saved,
}

impl Default for WorkflowStage {
    fn default() -> Self {
        WorkflowStage::CheckingIn
    }
}

#[derive(Debug, Default)]
pub struct WorkflowState {
    pub stage: WorkflowStage,
    pub fix: Option<GeoFix>,
    pub note: String,
    pub analysis: Option<AnalysisResult>,
    pub selected_title: Option<String>,
    pub output_type: OutputType,
    pub draft: String,
    /// Most-recent-first; seeded from the list call, prepended on save.
    pub artifacts: Vec<Artifact>,
    /// Single latest-error slot: replaced on each new error, cleared on
    /// the next successful transition.
    pub last_error: Option<String>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn selected_thread(&self) -> Option<&Thread> {
        let title = self.selected_title.as_deref()?;
        self.analysis
            .as_ref()?
            .threads
            .iter()
            .find(|thread| thread.title == title)
    }

    /// Install a fresh analysis and auto-select the first-listed thread.
    /// First-listed is the product default, regardless of support level.
    /// A new analysis invalidates any prior selection and draft.
    pub fn apply_analysis(&mut self, analysis: AnalysisResult) {
        self.selected_title = analysis.threads.first().map(|t| t.title.clone());
        self.analysis = Some(analysis);
        self.draft.clear();
        self.stage = WorkflowStage::ThreadsReady;
    }

    /// Switch the active thread. The draft survives re-selecting the
    /// same thread; it is cleared only when the selection changed.
    pub fn select_thread(&mut self, title: &str) -> bool {
        let known = self
            .analysis
            .as_ref()
            .map(|a| a.threads.iter().any(|t| t.title == title))
            .unwrap_or(false);
        if !known {
            return false;
        }
        if self.selected_title.as_deref() != Some(title) {
            self.draft.clear();
        }
        self.selected_title = Some(title.to_string());
        self.stage = WorkflowStage::Drafting;
        true
    }

    pub fn set_output_type(&mut self, output_type: OutputType) {
        if self.output_type != output_type {
            self.draft.clear();
        }
        self.output_type = output_type;
    }

    /// Save preconditions, checked before any network work. Gating is
    /// symmetric with analysis: neither call starts while the other is
    /// in flight.
    pub fn save_blocker(&self) -> Option<&'static str> {
        if matches!(self.stage, WorkflowStage::Saving | WorkflowStage::Analyzing) {
            return Some("another request is in flight");
        }
        if self.draft.trim().is_empty() {
            return Some("draft is empty");
        }
        if self.selected_thread().is_none() {
            return Some("no thread selected");
        }
        if self.fix.is_none() {
            return Some("no location fix");
        }
        None
    }
}
