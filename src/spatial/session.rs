use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::CoreConfig;
use crate::error::CoreError;

use super::anchor::{self, AnchorCard, CardTransform, PlacementOutcome};
use super::platform::{ArPlatform, CameraPose};
use super::tracking::{ReticlePose, TrackingEngine};

/// Shared reticle/anchor cell: written only inside the frame loop, read
/// by the placement trigger and UI snapshots. The mutex is the
/// single-writer/single-reader guard the two activities meet at.
#[derive(Debug, Default)]
struct SpatialState {
    engine: TrackingEngine,
    camera: CameraPose,
    card: Option<AnchorCard>,
    card_transform: Option<CardTransform>,
    frames_processed: u64,
    active: bool,
}

/// What the render layer reads each frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialSnapshot {
    pub active: bool,
    pub reticle: ReticlePose,
    pub card: Option<AnchorCard>,
    pub card_transform: Option<CardTransform>,
    pub frames_processed: u64,
}

/// Owns the tracking session lifecycle: starts the per-frame loop,
/// routes placement triggers, and guarantees teardown on every exit
/// path (explicit end or abrupt tracking loss).
pub struct ArSessionController {
    state: Arc<Mutex<SpatialState>>,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    config: CoreConfig,
}

impl ArSessionController {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(SpatialState::default())),
            handle: None,
            cancel_token: None,
            config,
        }
    }

    /// Start the frame loop on `platform`. Reports `TrackingUnsupported`
    /// once, before any per-frame work, when the device cannot track; the
    /// caller then degrades to its non-spatial view for the session.
    pub async fn start(&mut self, platform: Box<dyn ArPlatform>) -> Result<(), CoreError> {
        // A loop that ended on its own (abrupt tracking loss) leaves its
        // task behind; reap it so a fresh start succeeds. A loop whose
        // state is still active is genuinely running.
        if let Some(handle) = self.handle.take() {
            if self.state.lock().await.active {
                self.handle = Some(handle);
                return Err(CoreError::Precondition("tracking session already active"));
            }
            let _ = handle.await;
            self.cancel_token = None;
        }
        if !platform.supports_world_tracking() {
            warn!("world tracking unsupported, staying in list view");
            return Err(CoreError::TrackingUnsupported);
        }

        {
            let mut state = self.state.lock().await;
            *state = SpatialState {
                active: true,
                ..SpatialState::default()
            };
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        let state = Arc::clone(&self.state);

        info!("starting tracking session");
        self.handle = Some(tokio::spawn(frame_loop(platform, state, token_clone)));
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// End the session: stop the frame loop synchronously and release the
    /// tracking resources. Safe to call when no session is running.
    pub async fn end(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("tracking loop task failed to join")?;
        }
        Ok(())
    }

    /// Placement trigger. A tap while the reticle is hidden is expected
    /// during scanning and is dropped silently, never an error. A hit
    /// replaces any prior card; the session holds at most one.
    pub async fn place_card(
        &self,
        title: &str,
        draft: &str,
        note: &str,
    ) -> Result<PlacementOutcome, CoreError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        if !state.active {
            return Err(CoreError::Precondition("no tracking session active"));
        }

        let reticle = state.engine.reticle();
        match anchor::place_card(reticle, title, draft, note, self.config.card_preview_chars) {
            Some(card) => {
                state.card_transform = Some(anchor::card_transform(&card, &state.camera));
                let replaced = state.card.replace(card).is_some();
                info!(
                    "anchor card placed at {:?} (replaced prior: {replaced})",
                    reticle.position
                );
                Ok(PlacementOutcome::Placed)
            }
            None => {
                debug!("placement trigger ignored, no surface tracked");
                Ok(PlacementOutcome::Ignored)
            }
        }
    }

    pub async fn snapshot(&self) -> SpatialSnapshot {
        let state = self.state.lock().await;
        SpatialSnapshot {
            active: state.active,
            reticle: state.engine.reticle(),
            card: state.card.clone(),
            card_transform: state.card_transform,
            frames_processed: state.frames_processed,
        }
    }
}

/// One iteration per rendered frame: hit-test, update the reticle, and
/// redraw the frozen card against the new camera. Frame N is consumed
/// completely before frame N+1 is awaited. The loop owns the platform
/// handle, so dropping out of here on any path releases the camera and
/// tracking resources; the cleanup below also destroys the card.
async fn frame_loop(
    mut platform: Box<dyn ArPlatform>,
    state: Arc<Mutex<SpatialState>>,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            frame = platform.next_frame() => {
                let Some(camera) = frame else {
                    warn!("tracking lost, ending session");
                    break;
                };
                let hit = platform.hit_test(&camera.forward_ray());
                let mut guard = state.lock().await;
                let st = &mut *guard;
                st.camera = camera;
                st.engine.process_frame(hit);
                st.card_transform = st
                    .card
                    .as_ref()
                    .map(|card| anchor::card_transform(card, &camera));
                st.frames_processed += 1;
            }
            _ = cancel_token.cancelled() => {
                info!("tracking loop shutting down");
                break;
            }
        }
    }

    // Fail-safe teardown, runs however the loop ended.
    let mut guard = state.lock().await;
    guard.card = None;
    guard.card_transform = None;
    guard.active = false;
    guard.engine.process_frame(None);
    drop(guard);
    drop(platform);
}
