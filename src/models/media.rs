use serde::{Deserialize, Serialize};

/// Where a photo came from; the device seam treats a live camera shot
/// and a library pick identically once the bytes arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhotoSource {
    Camera,
    Library,
}

/// A captured still. Owned by the capture session until it is handed to
/// the analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// A bounded-duration microphone recording. `duration_ms` never exceeds
/// the 30s cap; the auto-stop clamps it to exactly the cap when it fires.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub duration_ms: u64,
}
