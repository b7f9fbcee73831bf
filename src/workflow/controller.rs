use std::sync::Arc;

use log::{error, info, warn};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::backstage::{AnalysisRequest, Backstage};
use crate::capture::{CaptureSession, RecordingHandle};
use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::models::{
    AnalysisResult, Artifact, AudioClip, GeoFix, NewArtifact, OutputType, Photo, PhotoSource,
};

use super::state::{WorkflowStage, WorkflowState};

/// Read-only view of the workflow for the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    pub stage: WorkflowStage,
    pub fix: Option<GeoFix>,
    pub note: String,
    pub analysis: Option<AnalysisResult>,
    pub selected_title: Option<String>,
    pub output_type: OutputType,
    pub draft: String,
    pub artifacts: Vec<Artifact>,
    pub last_error: Option<String>,
}

/// Sequences the check-in → capture → analyze → select → draft → save
/// flow over the capture session and the backstage boundary. Network
/// failures revert to the pre-attempt stage with all user data intact;
/// the single latest-error slot carries what the UI shows.
#[derive(Clone)]
pub struct WorkflowController {
    state: Arc<Mutex<WorkflowState>>,
    backstage: Arc<dyn Backstage>,
    capture: CaptureSession,
    config: CoreConfig,
}

impl WorkflowController {
    pub fn new(
        backstage: Arc<dyn Backstage>,
        capture: CaptureSession,
        config: CoreConfig,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(WorkflowState::new())),
            backstage,
            capture,
            config,
        }
    }

    pub fn capture(&self) -> &CaptureSession {
        &self.capture
    }

    pub async fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.state.lock().await;
        WorkflowSnapshot {
            stage: state.stage,
            fix: state.fix.clone(),
            note: state.note.clone(),
            analysis: state.analysis.clone(),
            selected_title: state.selected_title.clone(),
            output_type: state.output_type,
            draft: state.draft.clone(),
            artifacts: state.artifacts.clone(),
            last_error: state.last_error.clone(),
        }
    }

    /// Check in at the current place: one location attempt plus a seed of
    /// the artifact list. The stage moves to `Ready` whether or not the
    /// fix arrived; submission stays gated on a present fix. A list
    /// failure is logged and never blocks check-in.
    pub async fn check_in(&self) -> Result<GeoFix, CoreError> {
        match self.backstage.list_artifacts().await {
            Ok(artifacts) => {
                let mut state = self.state.lock().await;
                state.artifacts = artifacts;
            }
            Err(err) => warn!("artifact list seed failed: {err}"),
        }

        let result = self.capture.acquire_location().await;
        let mut state = self.state.lock().await;
        if state.stage == WorkflowStage::CheckingIn {
            state.stage = WorkflowStage::Ready;
        }
        match result {
            Ok(fix) => {
                info!("checked in at ({:.3}, {:.3})", fix.latitude, fix.longitude);
                state.fix = Some(fix.clone());
                state.clear_error();
                Ok(fix)
            }
            Err(err) => {
                error!("location acquisition failed: {err}");
                state.record_error(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn set_note(&self, note: impl Into<String>) {
        self.state.lock().await.note = note.into();
    }

    pub async fn capture_photo(&self, source: PhotoSource) -> Result<Photo, CoreError> {
        let result = self.capture.capture_photo(source).await;
        self.record_if_err(&result).await;
        result
    }

    pub async fn start_audio(&self) -> Result<RecordingHandle, CoreError> {
        let result = self.capture.start_audio().await;
        self.record_if_err(&result).await;
        result
    }

    pub async fn stop_audio(&self, handle: RecordingHandle) -> Result<AudioClip, CoreError> {
        self.capture.stop_audio(handle).await
    }

    /// Submit the capture for analysis. Requires a fix; rejects while an
    /// analysis or save is in flight. Success installs the threads and
    /// auto-selects the first-listed one.
    pub async fn submit_for_analysis(&self) -> Result<AnalysisResult, CoreError> {
        let (fix, note, pre_stage) = {
            let mut state = self.state.lock().await;
            if matches!(state.stage, WorkflowStage::Analyzing | WorkflowStage::Saving) {
                return Err(CoreError::Precondition("another request is in flight"));
            }
            let Some(fix) = state.fix.clone() else {
                return Err(CoreError::Precondition("check-in has no location fix"));
            };
            let pre_stage = state.stage;
            state.stage = WorkflowStage::Analyzing;
            (fix, state.note.clone(), pre_stage)
        };

        let request = AnalysisRequest {
            fix,
            note,
            photos: self.capture.photos().await,
            audio: self.capture.audio_clip().await,
        };

        match self.backstage.analyze(request).await {
            Ok(analysis) => {
                let mut state = self.state.lock().await;
                info!(
                    "analysis returned {} thread(s) for '{}'",
                    analysis.threads.len(),
                    analysis.place_label
                );
                state.apply_analysis(analysis.clone());
                state.clear_error();
                Ok(analysis)
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                error!("analysis failed: {err}");
                state.record_error(err.to_string());
                state.stage = pre_stage;
                Err(err)
            }
        }
    }

    /// Make `title` the active thread; clears the draft only when the
    /// selection actually changed. Re-fetching the draft stays explicit.
    pub async fn select_thread(&self, title: &str) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        if state.analysis.is_none() {
            return Err(CoreError::Precondition("no analysis to select from"));
        }
        if !state.select_thread(title) {
            return Err(CoreError::Precondition("unknown thread title"));
        }
        Ok(())
    }

    pub async fn set_output_type(&self, output_type: OutputType) {
        self.state.lock().await.set_output_type(output_type);
    }

    /// Explicit draft fetch for the active thread and output type.
    pub async fn fetch_draft(&self) -> Result<String, CoreError> {
        let (title, output_type, note) = {
            let state = self.state.lock().await;
            let Some(thread) = state.selected_thread() else {
                return Err(CoreError::Precondition("no thread selected"));
            };
            let note: String = state.note.chars().take(self.config.draft_note_chars).collect();
            (thread.title.clone(), state.output_type, note)
        };

        match self.backstage.draft(&title, output_type, &note).await {
            Ok(draft) => {
                let mut state = self.state.lock().await;
                state.draft = draft.clone();
                state.stage = WorkflowStage::Drafting;
                state.clear_error();
                Ok(draft)
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                error!("draft fetch failed: {err}");
                state.record_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Free-form draft edit. Editing after a save returns the stage to
    /// `Drafting` so another artifact can be produced.
    pub async fn set_draft(&self, text: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.draft = text.into();
        if state.stage == WorkflowStage::Saved {
            state.stage = WorkflowStage::Drafting;
        }
    }

    /// Persist the current draft as an artifact. Precondition failures
    /// (empty draft, no thread, no fix, save in flight) never reach the
    /// network. Success prepends the saved artifact; the workflow does
    /// not lock, more saves may follow.
    pub async fn save(&self) -> Result<Artifact, CoreError> {
        let (new_artifact, pre_stage) = {
            let mut state = self.state.lock().await;
            if let Some(blocker) = state.save_blocker() {
                return Err(CoreError::Precondition(blocker));
            }
            let pre_stage = state.stage;
            let thread_title = state
                .selected_title
                .clone()
                .ok_or(CoreError::Precondition("no thread selected"))?;
            let fix = state
                .fix
                .clone()
                .ok_or(CoreError::Precondition("no location fix"))?;
            let new_artifact = NewArtifact {
                fix,
                note: state.note.clone(),
                output_type: state.output_type,
                thread_title,
                text: state.draft.clone(),
                place_label: state.analysis.as_ref().map(|a| a.place_label.clone()),
            };
            state.stage = WorkflowStage::Saving;
            (new_artifact, pre_stage)
        };

        match self.backstage.save_artifact(new_artifact).await {
            Ok(artifact) => {
                let mut state = self.state.lock().await;
                info!("saved artifact {}", artifact.id);
                state.artifacts.insert(0, artifact.clone());
                state.stage = WorkflowStage::Saved;
                state.clear_error();
                Ok(artifact)
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                error!("save failed: {err}");
                state.record_error(err.to_string());
                state.stage = pre_stage;
                Err(err)
            }
        }
    }

    /// A thread must be selected before the AR session may start.
    pub async fn selected_thread_title(&self) -> Option<String> {
        self.state.lock().await.selected_title.clone()
    }

    /// Current draft and note, used to bake the anchor card's preview.
    pub async fn card_content(&self) -> (String, String) {
        let state = self.state.lock().await;
        (state.draft.clone(), state.note.clone())
    }

    async fn record_if_err<T>(&self, result: &Result<T, CoreError>) {
        if let Err(err) = result {
            self.state.lock().await.record_error(err.to_string());
        }
    }
}
