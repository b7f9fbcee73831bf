mod audio;
pub mod sensors;

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout, Duration, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::models::{AudioClip, GeoFix, Photo, PhotoSource};

pub use audio::RecordingHandle;
pub use sensors::{AudioInput, AudioStream, LocationSensor, PhotoInput};

use audio::ActiveRecording;

#[derive(Default)]
struct CaptureState {
    photos: Vec<Photo>,
    recording: Option<ActiveRecording>,
    /// Last finalized recording, keyed by the handle that produced it so
    /// a stop with an unrelated handle cannot claim it.
    clip: Option<(Uuid, AudioClip)>,
}

/// Owns device sensor acquisition for one capture round and exposes
/// immutable results to the workflow. Cheap to clone; clones share the
/// same capture state.
#[derive(Clone)]
pub struct CaptureSession {
    state: Arc<Mutex<CaptureState>>,
    location: Arc<dyn LocationSensor>,
    camera: Arc<dyn PhotoInput>,
    audio: Arc<dyn AudioInput>,
    config: CoreConfig,
}

impl CaptureSession {
    pub fn new(
        location: Arc<dyn LocationSensor>,
        camera: Arc<dyn PhotoInput>,
        audio: Arc<dyn AudioInput>,
        config: CoreConfig,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(CaptureState::default())),
            location,
            camera,
            audio,
            config,
        }
    }

    /// One acquisition attempt with a hard deadline. Never retries; the
    /// caller decides whether to invoke again.
    pub async fn acquire_location(&self) -> Result<GeoFix, CoreError> {
        let deadline = Duration::from_secs(self.config.location_timeout_secs);
        match timeout(deadline, self.location.acquire()).await {
            Ok(result) => result,
            Err(_) => Err(CoreError::LocationUnavailable(format!(
                "no fix within {}s",
                self.config.location_timeout_secs
            ))),
        }
    }

    /// Capture a photo and retain it, keeping at most the first
    /// `max_photos` in capture order. Captures past the cap are dropped
    /// silently; the cap mirrors a UX limit, not a platform one.
    pub async fn capture_photo(&self, source: PhotoSource) -> Result<Photo, CoreError> {
        let photo = self.camera.capture(source).await?;
        let mut state = self.state.lock().await;
        if state.photos.len() >= self.config.max_photos {
            debug!(
                "photo cap of {} reached, dropping '{}'",
                self.config.max_photos, photo.filename
            );
            return Ok(photo);
        }
        info!("captured photo '{}' ({} bytes)", photo.filename, photo.bytes.len());
        state.photos.push(photo.clone());
        Ok(photo)
    }

    pub async fn photos(&self) -> Vec<Photo> {
        self.state.lock().await.photos.clone()
    }

    /// Begin buffering from the microphone. Rejects a concurrent start
    /// and spawns the auto-stop task that finalizes the clip at the cap
    /// if no explicit stop arrives first.
    pub async fn start_audio(&self) -> Result<RecordingHandle, CoreError> {
        let mut state = self.state.lock().await;
        if state.recording.is_some() {
            return Err(CoreError::CaptureAlreadyActive);
        }
        if !self.audio.is_available() {
            return Err(CoreError::MediaUnsupported);
        }

        let stream = self.audio.open_stream()?;
        let id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        state.recording = Some(ActiveRecording {
            id,
            stream,
            started: Instant::now(),
            cancel: cancel.clone(),
        });
        drop(state);

        info!("audio recording {id} started, cap {} ms", self.config.max_audio_ms);
        let session = self.clone();
        let max_ms = self.config.max_audio_ms;
        tokio::spawn(async move {
            tokio::select! {
                _ = sleep(Duration::from_millis(max_ms)) => {
                    session.auto_stop(id, max_ms).await;
                }
                _ = cancel.cancelled() => {}
            }
        });

        Ok(RecordingHandle { id })
    }

    /// Explicit stop. If the auto-stop already fired, this is the losing
    /// side of a harmless race and returns the clip it produced.
    pub async fn stop_audio(&self, handle: RecordingHandle) -> Result<AudioClip, CoreError> {
        let mut state = self.state.lock().await;
        match state.recording.take() {
            Some(recording) if recording.id == handle.id => {
                let clip = recording.finish(self.config.max_audio_ms);
                state.clip = Some((handle.id, clip.clone()));
                Ok(clip)
            }
            Some(other) => {
                // A stale handle must not kill a newer recording.
                state.recording = Some(other);
                Err(CoreError::Precondition("stale audio recording handle"))
            }
            None => match &state.clip {
                Some((id, clip)) if *id == handle.id => Ok(clip.clone()),
                _ => Err(CoreError::Precondition("no audio capture active")),
            },
        }
    }

    async fn auto_stop(&self, id: Uuid, max_ms: u64) {
        let mut state = self.state.lock().await;
        match state.recording.take() {
            Some(recording) if recording.id == id => {
                warn!("audio recording {id} hit the {max_ms} ms cap, auto-stopping");
                let clip = recording.finish(max_ms);
                state.clip = Some((id, clip));
            }
            other => {
                // Explicit stop won the race; nothing to do.
                state.recording = other;
            }
        }
    }

    pub async fn audio_clip(&self) -> Option<AudioClip> {
        self.state.lock().await.clip.clone().map(|(_, clip)| clip)
    }

    /// Drop captured media for a fresh round. An in-flight recording is
    /// cancelled and discarded.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        if let Some(recording) = state.recording.take() {
            recording.cancel.cancel();
        }
        state.photos.clear();
        state.clip = None;
    }
}
