use log::info;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::models::AudioClip;

use super::sensors::AudioStream;

/// Opaque token returned by `start_audio`, required to stop the same
/// recording. Stale handles after an auto-stop are harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingHandle {
    pub(crate) id: Uuid,
}

/// A microphone stream that is currently buffering, together with the
/// cancellation token its auto-stop task waits on.
pub(crate) struct ActiveRecording {
    pub(crate) id: Uuid,
    pub(crate) stream: Box<dyn AudioStream>,
    pub(crate) started: Instant,
    pub(crate) cancel: CancellationToken,
}

impl ActiveRecording {
    /// Drain the stream into a finished clip, clamping the duration to
    /// the cap. The auto-stop fires exactly at the cap, so a clip ended
    /// by the deadline always reports `duration_ms == max_ms`.
    pub(crate) fn finish(mut self, max_ms: u64) -> AudioClip {
        self.cancel.cancel();
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        let duration_ms = elapsed_ms.min(max_ms);
        let clip = AudioClip {
            bytes: self.stream.drain(),
            mime: self.stream.mime(),
            duration_ms,
        };
        info!(
            "audio recording {} finished: {} bytes, {} ms",
            self.id,
            clip.bytes.len(),
            clip.duration_ms
        );
        clip
    }
}
