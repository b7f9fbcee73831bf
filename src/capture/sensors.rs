//! Device seams. Each trait has a platform implementation on the app
//! side and a scripted fake in tests; this crate never touches hardware
//! directly.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::{GeoFix, Photo, PhotoSource};

/// One-shot permissioned location read. No retry loop lives behind this:
/// a failed acquire is surfaced and the caller decides to re-invoke.
#[async_trait]
pub trait LocationSensor: Send + Sync {
    async fn acquire(&self) -> Result<GeoFix, CoreError>;
}

/// Camera shot or library pick, resolved to bytes + filename.
#[async_trait]
pub trait PhotoInput: Send + Sync {
    async fn capture(&self, source: PhotoSource) -> Result<Photo, CoreError>;
}

/// Microphone capability. `open_stream` starts buffering immediately;
/// the stream is drained exactly once when the recording is finalized.
pub trait AudioInput: Send + Sync {
    fn is_available(&self) -> bool;
    fn open_stream(&self) -> Result<Box<dyn AudioStream>, CoreError>;
}

pub trait AudioStream: Send {
    /// Bytes buffered since the stream opened (or since the last drain).
    fn drain(&mut self) -> Vec<u8>;
    fn mime(&self) -> String;
}
