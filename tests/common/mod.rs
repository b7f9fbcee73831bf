//! Scripted device and backstage fakes shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify, Semaphore};

use portal_core::spatial::Ray;
use portal_core::{
    AnalysisRequest, AnalysisResult, ArPlatform, Artifact, AudioInput, AudioStream, Backstage,
    CameraPose, CoreError, GeoFix, LocationSensor, NetworkStage, NewArtifact, OutputType, Photo,
    PhotoInput, PhotoSource, SurfacePose, SyntheticBackstage,
};

pub fn fix_at(lat: f64, lon: f64) -> GeoFix {
    GeoFix::new(lat, lon, Some(5.0))
}

/// Location sensor with a scripted outcome.
pub enum FakeLocation {
    Fix(GeoFix),
    Denied,
    /// Never resolves; exercises the acquisition timeout.
    Hangs,
}

#[async_trait]
impl LocationSensor for FakeLocation {
    async fn acquire(&self) -> Result<GeoFix, CoreError> {
        match self {
            FakeLocation::Fix(fix) => Ok(fix.clone()),
            FakeLocation::Denied => Err(CoreError::LocationUnavailable(
                "permission denied".to_string(),
            )),
            FakeLocation::Hangs => std::future::pending().await,
        }
    }
}

/// Camera yielding numbered photos in capture order.
#[derive(Default)]
pub struct FakeCamera {
    shots: AtomicU32,
}

#[async_trait]
impl PhotoInput for FakeCamera {
    async fn capture(&self, _source: PhotoSource) -> Result<Photo, CoreError> {
        let n = self.shots.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Photo {
            bytes: vec![0xAB; 16],
            filename: format!("photo-{n}.jpg"),
        })
    }
}

/// Microphone producing a fixed byte chunk per drain.
pub struct FakeAudio {
    pub available: bool,
}

pub struct FakeAudioStream;

impl AudioStream for FakeAudioStream {
    fn drain(&mut self) -> Vec<u8> {
        vec![0x01; 64]
    }

    fn mime(&self) -> String {
        "audio/webm".to_string()
    }
}

impl AudioInput for FakeAudio {
    fn is_available(&self) -> bool {
        self.available
    }

    fn open_stream(&self) -> Result<Box<dyn AudioStream>, CoreError> {
        if self.available {
            Ok(Box::new(FakeAudioStream))
        } else {
            Err(CoreError::MediaUnsupported)
        }
    }
}

/// Synthetic backstage with per-stage failure switches, for exercising
/// the revert-and-surface error path.
#[derive(Default)]
pub struct FlakyBackstage {
    inner: SyntheticBackstage,
    pub fail_analyze: AtomicBool,
    pub fail_save: AtomicBool,
    pub fail_draft: AtomicBool,
}

impl FlakyBackstage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backstage for FlakyBackstage {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, CoreError> {
        if self.fail_analyze.load(Ordering::SeqCst) {
            return Err(CoreError::network(NetworkStage::Analyze, "backstage down"));
        }
        self.inner.analyze(request).await
    }

    async fn draft(
        &self,
        thread_title: &str,
        output_type: OutputType,
        note: &str,
    ) -> Result<String, CoreError> {
        if self.fail_draft.load(Ordering::SeqCst) {
            return Err(CoreError::network(NetworkStage::Draft, "backstage down"));
        }
        self.inner.draft(thread_title, output_type, note).await
    }

    async fn save_artifact(&self, artifact: NewArtifact) -> Result<Artifact, CoreError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(CoreError::network(NetworkStage::Save, "backstage down"));
        }
        self.inner.save_artifact(artifact).await
    }

    async fn list_artifacts(&self) -> Result<Vec<Artifact>, CoreError> {
        self.inner.list_artifacts().await
    }

    async fn get_artifact(&self, id: &str) -> Result<Artifact, CoreError> {
        self.inner.get_artifact(id).await
    }
}

/// World-tracking fake driven by a frame script. After the script runs
/// out it either parks forever or, when `end_signal` is set, waits for
/// the signal and then reports tracking loss (`next_frame() == None`).
pub struct ScriptedPlatform {
    pub supported: bool,
    frames: Mutex<VecDeque<(CameraPose, Option<SurfacePose>)>>,
    current_hit: Mutex<Option<SurfacePose>>,
    pub end_signal: Option<Arc<Notify>>,
    /// When set, every frame waits for one permit, letting tests step
    /// the loop frame by frame.
    pub gate: Option<Arc<Semaphore>>,
}

impl ScriptedPlatform {
    pub fn new(frames: Vec<(CameraPose, Option<SurfacePose>)>) -> Self {
        Self {
            supported: true,
            frames: Mutex::new(frames.into()),
            current_hit: Mutex::new(None),
            end_signal: None,
            gate: None,
        }
    }

    pub fn unsupported() -> Self {
        let mut platform = Self::new(vec![]);
        platform.supported = false;
        platform
    }

    pub fn with_end_signal(mut self, signal: Arc<Notify>) -> Self {
        self.end_signal = Some(signal);
        self
    }

    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl ArPlatform for ScriptedPlatform {
    fn supports_world_tracking(&self) -> bool {
        self.supported
    }

    async fn next_frame(&mut self) -> Option<CameraPose> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("frame gate closed").forget();
        }
        let next = self.frames.lock().await.pop_front();
        match next {
            Some((camera, hit)) => {
                *self.current_hit.lock().await = hit;
                Some(camera)
            }
            None => match &self.end_signal {
                Some(signal) => {
                    signal.notified().await;
                    None
                }
                None => std::future::pending().await,
            },
        }
    }

    fn hit_test(&self, _ray: &Ray) -> Option<SurfacePose> {
        // The script pairs each frame with its hit; the ray itself is
        // exercised by the math unit tests.
        *self
            .current_hit
            .try_lock()
            .expect("hit_test called concurrently with next_frame")
    }
}
