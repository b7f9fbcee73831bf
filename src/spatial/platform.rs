use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::math::{Quat, Ray, Vec3};

/// Device viewpoint for one rendered frame, in the stabilized reference
/// frame the platform maintains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl CameraPose {
    /// Ray cast straight out of the viewer for this frame's hit-test.
    pub fn forward_ray(&self) -> Ray {
        Ray::new(self.position, self.orientation.rotate(Vec3::FORWARD))
    }
}

/// A hit on the platform's live surface model, already converted into
/// the stabilized reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfacePose {
    pub position: Vec3,
    pub orientation: Quat,
}

/// Seam to the device's world-tracking runtime.
///
/// One `next_frame` resolution per rendered frame; the session loop
/// consumes frame N completely before awaiting frame N+1, so hit-test
/// results are never skipped or batched. `None` from `next_frame` means
/// tracking was lost abruptly and the session must tear down.
#[async_trait]
pub trait ArPlatform: Send {
    /// Checked once at session start. When false, the session reports
    /// `TrackingUnsupported` and never does per-frame work.
    fn supports_world_tracking(&self) -> bool;

    async fn next_frame(&mut self) -> Option<CameraPose>;

    /// Intersect the forward ray against the live surface model. Zero or
    /// one hit per query; no smoothing or filtering is layered on top.
    fn hit_test(&self, ray: &Ray) -> Option<SurfacePose>;
}
