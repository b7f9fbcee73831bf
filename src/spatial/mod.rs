pub mod anchor;
pub mod math;
pub mod platform;
pub mod session;
pub mod tracking;

pub use anchor::{AnchorCard, CardTransform, PlacementOutcome};
pub use math::{Quat, Ray, Vec3};
pub use platform::{ArPlatform, CameraPose, SurfacePose};
pub use session::{ArSessionController, SpatialSnapshot};
pub use tracking::{ReticlePose, TrackingEngine};
