use thiserror::Error;

/// The network-bound call that failed, named so the UI can say which
/// stage to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStage {
    Analyze,
    Draft,
    Save,
    List,
}

impl NetworkStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkStage::Analyze => "analysis",
            NetworkStage::Draft => "draft",
            NetworkStage::Save => "save",
            NetworkStage::List => "list",
        }
    }
}

/// Failure taxonomy for the capture/workflow/tracking core.
///
/// None of these are fatal: every failure is recovered at the boundary
/// where it occurs and surfaced through the workflow's latest-error slot
/// while the frame loop and state machine keep running.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Location permission denied, sensor error, or the 10s acquisition
    /// timeout. One attempt per call; the caller decides to re-invoke.
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    /// Photo capture failed at the device seam (permission, hardware).
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    /// A second `start_audio` while a recording is already buffering.
    #[error("audio capture already active")]
    CaptureAlreadyActive,

    /// The platform exposes no audio input capability. Surfaced, not
    /// retried.
    #[error("no audio input available on this device")]
    MediaUnsupported,

    /// Analyze/draft/save/list call failed. The workflow reverts to its
    /// pre-call stage with all user data intact; retry is manual.
    #[error("{} request failed: {reason}", .stage.as_str())]
    Network { stage: NetworkStage, reason: String },

    /// Reported once at session start when the device has no world
    /// tracking; the caller degrades to a non-spatial list view.
    #[error("world tracking not supported on this device")]
    TrackingUnsupported,

    /// A gated operation was invoked before its preconditions held.
    /// Precondition failures never reach the network.
    #[error("{0}")]
    Precondition(&'static str),
}

impl CoreError {
    pub fn network(stage: NetworkStage, reason: impl Into<String>) -> Self {
        CoreError::Network {
            stage,
            reason: reason.into(),
        }
    }
}
