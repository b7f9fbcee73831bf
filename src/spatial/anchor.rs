use serde::{Deserialize, Serialize};

use super::math::Quat;
use super::platform::CameraPose;
use super::tracking::ReticlePose;

/// A card pinned into the tracked frame. The pose is a by-value snapshot
/// of the reticle at placement time; the text content is baked once and
/// never refreshed from later draft edits. At most one card exists per
/// session, a new placement replaces the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorCard {
    pub pose: ReticlePose,
    pub title: String,
    pub preview_text: String,
}

/// Whether a placement trigger took effect. Taps while no surface is
/// tracked are expected during scanning and are dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed,
    Ignored,
}

/// Per-frame draw data for the card: frozen world pose combined with the
/// current camera, so the card appears fixed in space as the device
/// moves. World-tracking continuity is the platform's job, not ours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTransform {
    /// Card position in the stabilized frame (unchanged after placement).
    pub world_pose: ReticlePose,
    /// Billboard orientation turning the card toward the current camera.
    pub billboard: Quat,
    /// Straight-line distance to the viewer, for scale/culling in the UI.
    pub distance: f64,
}

/// Build an `AnchorCard` from the current reticle, or ignore the trigger
/// when nothing is tracked.
pub fn place_card(
    reticle: ReticlePose,
    title: &str,
    draft: &str,
    note: &str,
    preview_chars: usize,
) -> Option<AnchorCard> {
    if !reticle.visible {
        return None;
    }
    Some(AnchorCard {
        pose: reticle,
        title: title.to_string(),
        preview_text: preview_text(draft, note, preview_chars),
    })
}

/// Card text is the leading slice of the draft, or of the note when no
/// draft exists yet.
fn preview_text(draft: &str, note: &str, preview_chars: usize) -> String {
    let source = if draft.trim().is_empty() { note } else { draft };
    source.chars().take(preview_chars).collect()
}

/// Recompute the card's draw transform for the current frame.
pub fn card_transform(card: &AnchorCard, camera: &CameraPose) -> CardTransform {
    CardTransform {
        world_pose: card.pose,
        billboard: Quat::facing(card.pose.position, camera.position),
        distance: camera.position.sub(card.pose.position).length(),
    }
}
