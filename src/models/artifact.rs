use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoFix;

/// Shape of the final text output the user is authoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputType {
    #[serde(rename = "micro-story")]
    MicroStory,
    #[serde(rename = "postcard")]
    Postcard,
    #[serde(rename = "performative-score")]
    PerformativeScore,
}

impl OutputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::MicroStory => "micro-story",
            OutputType::Postcard => "postcard",
            OutputType::PerformativeScore => "performative-score",
        }
    }
}

impl Default for OutputType {
    fn default() -> Self {
        OutputType::MicroStory
    }
}

/// Artifact payload as submitted to the save call, before the server
/// assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewArtifact {
    pub fix: GeoFix,
    pub note: String,
    pub output_type: OutputType,
    pub thread_title: String,
    pub text: String,
    pub place_label: Option<String>,
}

/// Persisted place-anchored text output. Immutable after save; `id` and
/// `created_at` are server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub fix: GeoFix,
    pub note: String,
    pub output_type: OutputType,
    pub thread_title: String,
    pub text: String,
    pub place_label: Option<String>,
}

impl Artifact {
    pub fn from_new(new: NewArtifact, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            fix: new.fix,
            note: new.note,
            output_type: new.output_type,
            thread_title: new.thread_title,
            text: new.text,
            place_label: new.place_label,
        }
    }
}
