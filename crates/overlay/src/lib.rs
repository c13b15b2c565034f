//! Geographic 3-D overlay: projects waypoints into a local scene frame,
//! fits a closed path through them and animates an object along it.

pub mod curve;
pub mod driver;
pub mod error;
pub mod projection;
pub mod track;
pub mod view;

pub use curve::{PathCurve, SplineKind};
pub use driver::{AnimationConfig, AnimationDriver, AnimationState, DriverState, FrameUpdate, Pose};
pub use error::InvalidInput;
pub use projection::{EnuProjection, GeoProjection, LatLngAlt};
pub use track::{TrackLine, TrackStyle};
pub use view::{MapCamera, OverlayView, ViewportSize};
