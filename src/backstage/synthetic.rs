//! Deterministic in-process backstage: synthesizes place labels,
//! interpretive threads, and drafts from coordinates and the note, and
//! keeps saved artifacts in memory. Doubles as the offline mode and the
//! test stand-in for the remote service.

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{
    Aesthetic, AnalysisResult, Artifact, NewArtifact, OutputType, SupportLevel, Thread,
};

use super::{AnalysisRequest, Backstage};

/// Loose Tagus-like band used to pick the riverside thread set.
fn in_river_band(lat: f64, lon: f64) -> bool {
    (36.0..41.0).contains(&lat) && (-10.0..-4.0).contains(&lon)
}

fn is_coastal(lat: f64, lon: f64) -> bool {
    lon.abs() < 20.0 || lat.abs() < 15.0
}

fn place_label(lat: f64, lon: f64) -> String {
    if in_river_band(lat, lon) {
        format!("Riverside bend near ({lat:.3}, {lon:.3})")
    } else if is_coastal(lat, lon) {
        format!("Coastal fringe around ({lat:.3}, {lon:.3})")
    } else {
        format!("Inland ridge near ({lat:.3}, {lon:.3})")
    }
}

fn verify_questions() -> Vec<String> {
    vec![
        "Who else keeps records of this place?".into(),
        "What photos or maps could confirm details?".into(),
        "Which community voices are missing here?".into(),
    ]
}

fn thread(
    title: &str,
    summary: String,
    support_level: SupportLevel,
    sources: &[&str],
) -> Thread {
    Thread {
        title: title.to_string(),
        summary,
        support_level,
        suggested_sources: sources.iter().map(|s| s.to_string()).collect(),
        verify_questions: verify_questions(),
    }
}

fn build_threads(lat: f64, lon: f64, note: &str) -> Vec<Thread> {
    let mut threads = if in_river_band(lat, lon) {
        vec![
            thread(
                "River trade and tides",
                "Merchant rafts once drifted here; floods rewrote paths and stories.".into(),
                SupportLevel::Supported,
                &["Port records", "Oral histories", "Tide charts"],
            ),
            thread(
                "Bridge rumors",
                "Locals speak of a temporary bridge that appeared only at low tide.".into(),
                SupportLevel::Likely,
                &["Newspaper clippings", "Municipal minutes"],
            ),
        ]
    } else if is_coastal(lat, lon) {
        vec![
            thread(
                "Salt wind archive",
                "Fisher cooperatives indexed storms with shells strung above doorways.".into(),
                SupportLevel::Likely,
                &["Family collections", "Weather logs"],
            ),
            thread(
                "Ship graffiti",
                "Hull markings carved by dockworkers doubled as secret navigation rhymes.".into(),
                SupportLevel::Speculative,
                &["Harbor walls", "Retired sailors"],
            ),
        ]
    } else {
        vec![
            thread(
                "Dry season crossings",
                "Caravans cut through here when the marshes shrank; stones still mark the line."
                    .into(),
                SupportLevel::Supported,
                &["Trail maps", "Satellite imagery"],
            ),
            thread(
                "Songs against dust",
                "Field choirs sang call-and-response to time irrigation releases.".into(),
                SupportLevel::Likely,
                &["Local elders", "Radio archives"],
            ),
        ]
    };

    let excerpt: String = note.chars().take(80).collect();
    threads.push(thread(
        "Overlay of legends",
        format!("A traveler wrote about this spot in a note: '{excerpt}...' and added their own myth."),
        SupportLevel::Speculative,
        &["Personal journals", "Community forums"],
    ));
    threads
}

fn reflection_prompts(lat: f64, lon: f64) -> Vec<String> {
    vec![
        "What sounds did you hear that others might miss?".into(),
        "How does the light or fog change the story of this place?".into(),
        format!(
            "What would someone 50km away assume about ({lat:.2}, {lon:.2}) and how could you correct them?"
        ),
    ]
}

#[derive(Default)]
pub struct SyntheticBackstage {
    // Newest artifact first, matching the list call's ordering contract.
    items: Mutex<Vec<Artifact>>,
}

impl SyntheticBackstage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backstage for SyntheticBackstage {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, CoreError> {
        let lat = request.fix.latitude;
        let lon = request.fix.longitude;
        info!(
            "synthetic analyze at ({lat:.3}, {lon:.3}) with {} photo(s), audio: {}",
            request.photos.len(),
            request.audio.is_some()
        );
        Ok(AnalysisResult {
            place_label: place_label(lat, lon),
            threads: build_threads(lat, lon, &request.note),
            reflection_prompts: reflection_prompts(lat, lon),
            aesthetic: Aesthetic {
                mood: "documentary-poetic".into(),
                style_tokens: vec!["grainy".into(), "local".into(), "unhurried".into()],
            },
        })
    }

    async fn draft(
        &self,
        thread_title: &str,
        output_type: OutputType,
        note: &str,
    ) -> Result<String, CoreError> {
        let excerpt: String = note.chars().take(100).collect();
        let base = format!("From {thread_title}, your note hints: {excerpt}");
        let text = match output_type {
            OutputType::MicroStory => format!(
                "{base}. A passerby pauses as wind drags the scent of metal and salt. \
                 Layers of rumor and record fold together in 140 words of compressed time."
            ),
            OutputType::Postcard => format!(
                "Caption: {base}. Source note: drafted by the backstage, please verify locally."
            ),
            OutputType::PerformativeScore => {
                "Score: (1) Map a path with footsteps, pause at every third stride. \
                 (2) Whisper the place name and your note. \
                 (3) Offer a gesture toward the nearest landmark."
                    .to_string()
            }
        };
        Ok(text)
    }

    async fn save_artifact(&self, artifact: NewArtifact) -> Result<Artifact, CoreError> {
        let saved = Artifact::from_new(artifact, Uuid::new_v4().to_string(), Utc::now());
        let mut items = self.items.lock().await;
        items.insert(0, saved.clone());
        Ok(saved)
    }

    async fn list_artifacts(&self) -> Result<Vec<Artifact>, CoreError> {
        Ok(self.items.lock().await.clone())
    }

    async fn get_artifact(&self, id: &str) -> Result<Artifact, CoreError> {
        self.items
            .lock()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| {
                CoreError::network(crate::error::NetworkStage::List, format!("artifact {id} not found"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoFix;

    fn request(lat: f64, lon: f64, note: &str) -> AnalysisRequest {
        AnalysisRequest {
            fix: GeoFix::new(lat, lon, None),
            note: note.to_string(),
            photos: vec![],
            audio: None,
        }
    }

    #[tokio::test]
    async fn river_band_gets_riverside_threads() {
        let backstage = SyntheticBackstage::new();
        let result = backstage.analyze(request(38.7, -9.1, "")).await.unwrap();
        assert!(result.place_label.starts_with("Riverside bend"));
        assert_eq!(result.threads[0].title, "River trade and tides");
        assert_eq!(result.threads[0].support_level, SupportLevel::Supported);
    }

    #[tokio::test]
    async fn threads_are_never_empty_and_end_with_legend_overlay() {
        let backstage = SyntheticBackstage::new();
        for (lat, lon) in [(38.7, -9.1), (51.0, 4.0), (48.0, 60.0)] {
            let result = backstage.analyze(request(lat, lon, "old bridge")).await.unwrap();
            assert!(!result.threads.is_empty());
            let legend = result.threads.last().unwrap();
            assert_eq!(legend.title, "Overlay of legends");
            assert!(legend.summary.contains("old bridge"));
        }
    }

    #[tokio::test]
    async fn drafts_vary_by_output_type() {
        let backstage = SyntheticBackstage::new();
        let story = backstage
            .draft("Bridge rumors", OutputType::MicroStory, "n")
            .await
            .unwrap();
        let postcard = backstage
            .draft("Bridge rumors", OutputType::Postcard, "n")
            .await
            .unwrap();
        let score = backstage
            .draft("Bridge rumors", OutputType::PerformativeScore, "n")
            .await
            .unwrap();
        assert!(story.contains("Bridge rumors"));
        assert!(postcard.starts_with("Caption:"));
        assert!(score.starts_with("Score:"));
    }

    #[tokio::test]
    async fn saved_artifacts_list_newest_first_with_assigned_ids() {
        let backstage = SyntheticBackstage::new();
        let fix = GeoFix::new(51.0, 4.0, None);
        for text in ["first", "second"] {
            backstage
                .save_artifact(NewArtifact {
                    fix: fix.clone(),
                    note: "old bridge".into(),
                    output_type: OutputType::Postcard,
                    thread_title: "Canal bridge history".into(),
                    text: text.into(),
                    place_label: None,
                })
                .await
                .unwrap();
        }
        let items = backstage.list_artifacts().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "second");
        assert!(!items[0].id.is_empty());

        let fetched = backstage.get_artifact(&items[1].id).await.unwrap();
        assert_eq!(fetched.text, "first");
        assert!(backstage.get_artifact("missing").await.is_err());
    }
}
