use serde::{Deserialize, Serialize};

/// How strongly the backstage believes a thread is grounded in record
/// rather than rumor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    Supported,
    Likely,
    Speculative,
}

/// One interpretive narrative candidate tied to the captured place.
/// Produced by the analysis call; read-only afterward. Titles are unique
/// within a single response and double as selection keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    pub title: String,
    pub summary: String,
    pub support_level: SupportLevel,
    pub suggested_sources: Vec<String>,
    pub verify_questions: Vec<String>,
}

/// Mood/style tokens the UI uses to theme the thread view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Aesthetic {
    pub mood: String,
    pub style_tokens: Vec<String>,
}

/// Full analysis response. `threads` is never empty on success; the
/// first-listed thread is the default selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub place_label: String,
    pub threads: Vec<Thread>,
    pub reflection_prompts: Vec<String>,
    pub aesthetic: Aesthetic,
}
