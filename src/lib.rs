//! Core for a place-bound capture and AR anchoring app: a capture
//! session over the device sensors, the check-in → analyze → draft →
//! save workflow, and a spatial subsystem that tracks a reticle over
//! detected surfaces and pins a billboard card where the user taps.
//!
//! The UI shell, the HTTP transport, and the device drivers live
//! outside this crate; they plug in through the [`Backstage`],
//! [`ArPlatform`], and capture sensor traits.

pub mod backstage;
pub mod capture;
pub mod config;
pub mod error;
pub mod models;
pub mod spatial;
pub mod workflow;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use backstage::{AnalysisRequest, Backstage, SyntheticBackstage};
pub use capture::{
    AudioInput, AudioStream, CaptureSession, LocationSensor, PhotoInput, RecordingHandle,
};
pub use config::CoreConfig;
pub use error::{CoreError, NetworkStage};
pub use models::{
    Aesthetic, AnalysisResult, Artifact, AudioClip, GeoFix, NewArtifact, OutputType, Photo,
    PhotoSource, SupportLevel, Thread,
};
pub use spatial::{
    AnchorCard, ArPlatform, ArSessionController, CameraPose, CardTransform, PlacementOutcome,
    ReticlePose, SpatialSnapshot, SurfacePose, TrackingEngine,
};
pub use workflow::{WorkflowController, WorkflowSnapshot, WorkflowStage};

/// Initialize `env_logger` once; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
}

/// Top-level handle wiring the workflow to the spatial subsystem. The
/// two run as independent concurrent activities; they only meet at the
/// "is a thread selected" gate and at card placement, where the card's
/// text comes from the current draft (or the note as fallback).
pub struct PortalCore {
    workflow: WorkflowController,
    spatial: Arc<Mutex<ArSessionController>>,
    config: CoreConfig,
}

impl PortalCore {
    pub fn new(
        backstage: Arc<dyn Backstage>,
        location: Arc<dyn LocationSensor>,
        camera: Arc<dyn PhotoInput>,
        audio: Arc<dyn AudioInput>,
        config: CoreConfig,
    ) -> Self {
        let capture = CaptureSession::new(location, camera, audio, config.clone());
        Self {
            workflow: WorkflowController::new(backstage, capture, config.clone()),
            spatial: Arc::new(Mutex::new(ArSessionController::new(config.clone()))),
            config,
        }
    }

    pub fn workflow(&self) -> &WorkflowController {
        &self.workflow
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Start tracking once a thread is selected. An unsupported device
    /// fails here, once, and the caller stays in the list view.
    pub async fn start_ar_session(&self, platform: Box<dyn ArPlatform>) -> Result<(), CoreError> {
        if self.workflow.selected_thread_title().await.is_none() {
            return Err(CoreError::Precondition(
                "select a thread before starting the AR session",
            ));
        }
        self.spatial.lock().await.start(platform).await
    }

    /// Placement trigger: pin a card with the selected thread's title and
    /// a preview of the current draft at the reticle. Ignored while no
    /// surface is tracked.
    pub async fn place_card(&self) -> Result<PlacementOutcome, CoreError> {
        let Some(title) = self.workflow.selected_thread_title().await else {
            return Err(CoreError::Precondition("no thread selected"));
        };
        let (draft, note) = self.workflow.card_content().await;
        self.spatial
            .lock()
            .await
            .place_card(&title, &draft, &note)
            .await
    }

    pub async fn end_ar_session(&self) -> anyhow::Result<()> {
        self.spatial.lock().await.end().await
    }

    pub async fn spatial_snapshot(&self) -> SpatialSnapshot {
        self.spatial.lock().await.snapshot().await
    }
}
