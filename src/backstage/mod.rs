pub mod synthetic;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::{AnalysisResult, Artifact, AudioClip, GeoFix, NewArtifact, OutputType, Photo};

pub use synthetic::SyntheticBackstage;

/// Everything the analysis call carries: the multipart form fields plus
/// at most two photos and one audio clip.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub fix: GeoFix,
    pub note: String,
    pub photos: Vec<Photo>,
    pub audio: Option<AudioClip>,
}

/// The opaque interpretation/persistence collaborator, one method per
/// remote call. The rule-based text generation behind `analyze` and
/// `draft` is a black box to this crate; an HTTP implementation and the
/// deterministic [`SyntheticBackstage`] are interchangeable here.
#[async_trait]
pub trait Backstage: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, CoreError>;

    async fn draft(
        &self,
        thread_title: &str,
        output_type: OutputType,
        note: &str,
    ) -> Result<String, CoreError>;

    /// Returns the artifact with server-assigned `id` and `created_at`.
    async fn save_artifact(&self, artifact: NewArtifact) -> Result<Artifact, CoreError>;

    /// Most-recent-first; used only to seed the in-memory view at
    /// check-in.
    async fn list_artifacts(&self) -> Result<Vec<Artifact>, CoreError>;

    async fn get_artifact(&self, id: &str) -> Result<Artifact, CoreError>;
}
