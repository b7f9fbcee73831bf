mod artifact;
mod geo;
mod media;
mod thread;

pub use artifact::{Artifact, NewArtifact, OutputType};
pub use geo::GeoFix;
pub use media::{AudioClip, Photo, PhotoSource};
pub use thread::{Aesthetic, AnalysisResult, SupportLevel, Thread};
