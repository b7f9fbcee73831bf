/// Tunable limits for capture and placement, threaded through the
/// controllers so tests can tighten them.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// One-shot location acquisition deadline.
    pub location_timeout_secs: u64,

    /// Hard cap on a single audio clip; the auto-stop fires here.
    pub max_audio_ms: u64,

    /// Photos held per capture round; extra captures are dropped silently.
    pub max_photos: usize,

    /// Characters of draft (or note fallback) baked into an anchor card.
    pub card_preview_chars: usize,

    /// Note excerpt length forwarded to draft requests.
    pub draft_note_chars: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            location_timeout_secs: 10,
            max_audio_ms: 30_000,
            max_photos: 2,
            card_preview_chars: 140,
            draft_note_chars: 100,
        }
    }
}
