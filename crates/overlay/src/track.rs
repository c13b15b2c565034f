use foundation::math::Vec3;
use scene::components::{Drawable3D, LineMaterial};
use serde::{Deserialize, Serialize};

use crate::curve::PathCurve;
use crate::error::InvalidInput;
use crate::view::ViewportSize;

/// Samples per waypoint.
pub const DEFAULT_TRACK_DENSITY: usize = 10;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackStyle {
    pub color: u32,
    pub width_px: f64,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            color: 0x0f9d58,
            width_px: 5.0,
        }
    }
}

/// Static polyline showing the path, sampled once from the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLine {
    points: Vec<Vec3>,
    style: TrackStyle,
}

impl TrackLine {
    /// Samples `density * waypoint_count` evenly spaced points.
    pub fn build(
        curve: &PathCurve,
        density: usize,
        style: TrackStyle,
    ) -> Result<Self, InvalidInput> {
        let points = curve.sample_uniform(density * curve.waypoint_count())?;
        Ok(Self { points, style })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn style(&self) -> TrackStyle {
        self.style
    }

    pub fn to_drawable(&self, resolution: ViewportSize) -> Drawable3D {
        Drawable3D::line(
            self.points.clone(),
            LineMaterial {
                color: self.style.color,
                width_px: self.style.width_px,
                resolution: resolution.as_array(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;
    use scene::components::Shape3D;

    use super::{DEFAULT_TRACK_DENSITY, TrackLine, TrackStyle};
    use crate::curve::{PathCurve, SplineKind};
    use crate::error::InvalidInput;
    use crate::view::ViewportSize;

    fn triangle() -> PathCurve {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(25.0, 40.0, 0.0),
        ];
        PathCurve::from_local_points(points, true, SplineKind::CatmullRom { tension: 0.2 })
            .expect("curve")
    }

    #[test]
    fn samples_density_points_per_waypoint() {
        let curve = triangle();
        let track = TrackLine::build(&curve, DEFAULT_TRACK_DENSITY, TrackStyle::default())
            .expect("track");
        assert_eq!(track.len(), 30);
        assert_eq!(track.points(), curve.sample_uniform(30).expect("samples").as_slice());
    }

    #[test]
    fn zero_density_is_rejected() {
        let err = TrackLine::build(&triangle(), 0, TrackStyle::default()).unwrap_err();
        assert_eq!(err, InvalidInput::ZeroSamples);
    }

    #[test]
    fn drawable_carries_style_and_resolution() {
        let track = TrackLine::build(&triangle(), 2, TrackStyle::default()).expect("track");
        let drawable = track.to_drawable(ViewportSize::new(640, 480));
        let Shape3D::Line { points, material } = drawable.shape else {
            panic!("expected a line");
        };
        assert_eq!(points.len(), 6);
        assert_eq!(material.color, 0x0f9d58);
        assert_eq!(material.width_px, 5.0);
        assert_eq!(material.resolution, [640, 480]);
    }
}
