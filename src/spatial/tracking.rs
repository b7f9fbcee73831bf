use serde::{Deserialize, Serialize};

use super::math::{Quat, Vec3};
use super::platform::SurfacePose;

/// Per-frame reticle over the currently tracked candidate surface point.
///
/// Recomputed every frame, never persisted. When a frame produces no
/// hit, the pose from the last hit is retained and only `visible` drops,
/// so a momentary hit loss does not make the indicator jump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReticlePose {
    pub position: Vec3,
    pub orientation: Quat,
    pub visible: bool,
}

impl Default for ReticlePose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            visible: false,
        }
    }
}

/// Stateless-per-frame hit-test consumer: each frame's result fully
/// determines the new reticle, relying on platform stabilization rather
/// than any smoothing here.
#[derive(Debug, Default)]
pub struct TrackingEngine {
    reticle: ReticlePose,
}

impl TrackingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reticle(&self) -> ReticlePose {
        self.reticle
    }

    /// Consume one frame's hit-test result.
    pub fn process_frame(&mut self, hit: Option<SurfacePose>) -> ReticlePose {
        match hit {
            Some(pose) => {
                self.reticle = ReticlePose {
                    position: pose.position,
                    orientation: pose.orientation,
                    visible: true,
                };
            }
            None => {
                // Keep the last pose to avoid flicker on momentary loss.
                self.reticle.visible = false;
            }
        }
        self.reticle
    }
}
