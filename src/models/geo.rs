use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One-shot location fix. Immutable once acquired; a stale fix is
/// replaced by re-running check-in, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
    pub captured_at: DateTime<Utc>,
}

impl GeoFix {
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters,
            captured_at: Utc::now(),
        }
    }
}
