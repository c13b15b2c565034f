//! Smoothed interpolation through the projected waypoints of a path.
//!
//! Segments are cubic Hermite pieces with Catmull-Rom-family tangents. The
//! public parameter comes in two flavours:
//! - `point` / `tangent` take the raw spline parameter, where every segment
//!   spans an equal slice of `[0, 1]`.
//! - `point_at` / `tangent_at` take a normalized arc length, so equal steps
//!   cover equal distances. Animation and sampling use these.

use foundation::math::Vec3;

use crate::error::InvalidInput;
use crate::projection::{GeoProjection, LatLngAlt};

pub const MIN_WAYPOINTS: usize = 3;
pub const DEFAULT_SMOOTHING: f64 = 0.2;

/// Resolution of the arc-length table built once per curve.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Tangent rule used at each control point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SplineKind {
    /// Cardinal spline. `tension` 0 gives straight runs between points; larger
    /// values round the corners and overshoot more.
    CatmullRom { tension: f64 },
    /// Non-uniform, alpha 0.5. Avoids cusps on unevenly spaced points.
    Centripetal,
    /// Non-uniform, alpha 1.
    Chordal,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Cubic {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl Cubic {
    fn hermite(p0: Vec3, p1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: p0,
            c1: t0,
            c2: p0 * -3.0 + p1 * 3.0 - t0 * 2.0 - t1,
            c3: p0 * 2.0 - p1 * 2.0 + t0 + t1,
        }
    }

    fn cardinal(x0: Vec3, x1: Vec3, x2: Vec3, x3: Vec3, tension: f64) -> Self {
        Self::hermite(x1, x2, (x2 - x0) * tension, (x3 - x1) * tension)
    }

    fn non_uniform(x0: Vec3, x1: Vec3, x2: Vec3, x3: Vec3, pow: f64) -> Self {
        let mut dt0 = x0.distance_squared(x1).powf(pow);
        let mut dt1 = x1.distance_squared(x2).powf(pow);
        let mut dt2 = x2.distance_squared(x3).powf(pow);

        // Coincident neighbours would divide by zero.
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        Self::hermite(x1, x2, t1 * dt1, t2 * dt1)
    }

    fn eval(&self, w: f64) -> Vec3 {
        self.c0 + self.c1 * w + self.c2 * (w * w) + self.c3 * (w * w * w)
    }

    fn derivative(&self, w: f64) -> Vec3 {
        self.c1 + self.c2 * (2.0 * w) + self.c3 * (3.0 * w * w)
    }

    fn chord(&self) -> Vec3 {
        self.c1 + self.c2 + self.c3
    }
}

/// Immutable curve through local-frame control points.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCurve {
    points: Vec<Vec3>,
    closed: bool,
    kind: SplineKind,
    segments: Vec<Cubic>,
    /// Cumulative length at `i / ARC_LENGTH_DIVISIONS` of the raw parameter.
    arc_lengths: Vec<f64>,
}

impl PathCurve {
    /// Project `waypoints` and fit a cardinal spline with `smoothing` as tension.
    pub fn build<P: GeoProjection + ?Sized>(
        projection: &P,
        waypoints: &[LatLngAlt],
        closed: bool,
        smoothing: f64,
    ) -> Result<Self, InvalidInput> {
        Self::build_with_kind(
            projection,
            waypoints,
            closed,
            SplineKind::CatmullRom { tension: smoothing },
        )
    }

    pub fn build_with_kind<P: GeoProjection + ?Sized>(
        projection: &P,
        waypoints: &[LatLngAlt],
        closed: bool,
        kind: SplineKind,
    ) -> Result<Self, InvalidInput> {
        check_count(waypoints.len())?;
        let points = waypoints.iter().map(|w| projection.project(*w)).collect();
        Self::from_local_points(points, closed, kind)
    }

    pub fn from_local_points(
        points: Vec<Vec3>,
        closed: bool,
        kind: SplineKind,
    ) -> Result<Self, InvalidInput> {
        check_count(points.len())?;
        if let SplineKind::CatmullRom { tension } = kind {
            if !(tension.is_finite() && tension >= 0.0) {
                return Err(InvalidInput::BadSmoothing(tension));
            }
        }

        let segments = fit_segments(&points, closed, kind);
        let mut curve = Self {
            points,
            closed,
            kind,
            segments,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.measure();

        let length = curve.length();
        if !(length.is_finite() && length > 1e-9) {
            return Err(InvalidInput::ZeroLengthPath);
        }
        Ok(curve)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn waypoint_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn kind(&self) -> SplineKind {
        self.kind
    }

    /// Total length in scene units, as measured by the arc-length table.
    pub fn length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at raw spline parameter `t`.
    pub fn point(&self, t: f64) -> Vec3 {
        let (idx, w) = self.locate(t);
        self.segments[idx].eval(w)
    }

    /// Unit direction of travel at raw spline parameter `t`.
    pub fn tangent(&self, t: f64) -> Vec3 {
        let (idx, w) = self.locate(t);
        self.segments[idx]
            .derivative(w)
            .try_normalize()
            .or_else(|| self.chord_direction(idx))
            // Validated curves always have a non-degenerate chord.
            .unwrap_or(Vec3::Y)
    }

    /// Point at normalized arc length `u`.
    pub fn point_at(&self, u: f64) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit direction of travel at normalized arc length `u`.
    pub fn tangent_at(&self, u: f64) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }

    /// `n` points at arc-length parameters `0, 1/n, ..., (n-1)/n`.
    pub fn sample_uniform(&self, n: usize) -> Result<Vec<Vec3>, InvalidInput> {
        if n == 0 {
            return Err(InvalidInput::ZeroSamples);
        }
        Ok((0..n)
            .map(|i| self.point_at(i as f64 / n as f64))
            .collect())
    }

    fn wrap(&self, t: f64) -> f64 {
        if !t.is_finite() {
            return 0.0;
        }
        if self.closed {
            let w = t.rem_euclid(1.0);
            // rem_euclid can round up to exactly 1.0 for tiny negatives.
            if w >= 1.0 { 0.0 } else { w }
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    fn locate(&self, t: f64) -> (usize, f64) {
        let count = self.segments.len();
        let p = self.wrap(t) * count as f64;
        let idx = (p.floor() as usize).min(count - 1);
        (idx, p - idx as f64)
    }

    fn chord_direction(&self, start: usize) -> Option<Vec3> {
        let count = self.segments.len();
        (0..count)
            .map(|k| self.segments[(start + k) % count].chord())
            .find_map(Vec3::try_normalize)
    }

    fn measure(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);

        for i in 1..=ARC_LENGTH_DIVISIONS {
            let t = i as f64 / ARC_LENGTH_DIVISIONS as f64;
            // On a closed curve `point(1.0)` wraps to the start, which is
            // where the last segment ends anyway.
            let current = self.point(t);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    fn u_to_t(&self, u: f64) -> f64 {
        let u = self.wrap(u);
        let lengths = &self.arc_lengths;
        let divisions = lengths.len() - 1;
        let target = u * self.length();

        // First entry that reaches the target.
        let idx = lengths.partition_point(|&l| l < target);
        if idx == 0 {
            return 0.0;
        }
        if idx > divisions {
            return 1.0;
        }
        if lengths[idx] == target {
            return idx as f64 / divisions as f64;
        }

        let before = lengths[idx - 1];
        let after = lengths[idx];
        let fraction = (target - before) / (after - before);
        ((idx - 1) as f64 + fraction) / divisions as f64
    }
}

fn check_count(count: usize) -> Result<(), InvalidInput> {
    if count < MIN_WAYPOINTS {
        return Err(InvalidInput::TooFewWaypoints {
            count,
            min: MIN_WAYPOINTS,
        });
    }
    Ok(())
}

fn fit_segments(points: &[Vec3], closed: bool, kind: SplineKind) -> Vec<Cubic> {
    let n = points.len();
    let count = if closed { n } else { n - 1 };

    (0..count)
        .map(|i| {
            let p1 = points[i];
            let p2 = points[(i + 1) % n];
            // Open ends get a phantom neighbour mirrored through the end point.
            let p0 = if closed {
                points[(i + n - 1) % n]
            } else if i > 0 {
                points[i - 1]
            } else {
                points[0] * 2.0 - points[1]
            };
            let p3 = if closed {
                points[(i + 2) % n]
            } else if i + 2 < n {
                points[i + 2]
            } else {
                points[n - 1] * 2.0 - points[n - 2]
            };

            match kind {
                SplineKind::CatmullRom { tension } => Cubic::cardinal(p0, p1, p2, p3, tension),
                SplineKind::Centripetal => Cubic::non_uniform(p0, p1, p2, p3, 0.25),
                SplineKind::Chordal => Cubic::non_uniform(p0, p1, p2, p3, 0.5),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;

    use super::{PathCurve, SplineKind};
    use crate::error::InvalidInput;
    use crate::projection::{GeoProjection, LatLngAlt};

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        let diff = (a - b).length();
        assert!(diff <= eps, "expected {a:?} ~= {b:?} (diff {diff})");
    }

    /// Lat/lng scaled straight onto x/y; enough to exercise the projection seam.
    struct Flat;

    impl GeoProjection for Flat {
        fn project(&self, coord: LatLngAlt) -> Vec3 {
            Vec3::new(coord.lng * 100.0, coord.lat * 100.0, coord.altitude)
        }
    }

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(100.0, 100.0, 0.0),
            Vec3::new(0.0, 100.0, 0.0),
        ]
    }

    fn loop_curve(tension: f64) -> PathCurve {
        PathCurve::from_local_points(square(), true, SplineKind::CatmullRom { tension })
            .expect("curve")
    }

    #[test]
    fn rejects_fewer_than_three_waypoints() {
        let waypoints = [LatLngAlt::new(0.0, 0.0), LatLngAlt::new(1.0, 0.0)];
        let err = PathCurve::build(&Flat, &waypoints, true, 0.2).unwrap_err();
        assert_eq!(err, InvalidInput::TooFewWaypoints { count: 2, min: 3 });
    }

    #[test]
    fn rejects_degenerate_paths_and_bad_smoothing() {
        let same = vec![Vec3::X; 4];
        assert_eq!(
            PathCurve::from_local_points(same, true, SplineKind::Centripetal).unwrap_err(),
            InvalidInput::ZeroLengthPath
        );
        assert_eq!(
            PathCurve::from_local_points(square(), true, SplineKind::CatmullRom { tension: -1.0 })
                .unwrap_err(),
            InvalidInput::BadSmoothing(-1.0)
        );
    }

    #[test]
    fn build_projects_every_waypoint() {
        let waypoints = [
            LatLngAlt::new(0.0, 0.0),
            LatLngAlt::new(0.0, 1.0),
            LatLngAlt::new(1.0, 1.0).with_altitude(5.0),
        ];
        let curve = PathCurve::build(&Flat, &waypoints, true, 0.2).expect("curve");
        assert_eq!(curve.waypoint_count(), 3);
        assert_eq!(curve.control_points()[2], Vec3::new(100.0, 100.0, 5.0));
        assert!(curve.is_closed());
    }

    #[test]
    fn raw_parameter_passes_through_control_points() {
        for kind in [
            SplineKind::CatmullRom { tension: 0.5 },
            SplineKind::Centripetal,
            SplineKind::Chordal,
        ] {
            let curve = PathCurve::from_local_points(square(), true, kind).expect("curve");
            for (i, p) in square().into_iter().enumerate() {
                assert_vec_close(curve.point(i as f64 / 4.0), p, 1e-9);
            }
        }
    }

    #[test]
    fn zero_smoothing_runs_straight_between_points() {
        let curve = loop_curve(0.0);
        assert_vec_close(curve.point(0.125), Vec3::new(50.0, 0.0, 0.0), 1e-9);
        assert!((curve.length() - 400.0).abs() < 1e-6);
    }

    #[test]
    fn more_smoothing_rounds_corners_outward() {
        let tight = loop_curve(0.1);
        let round = loop_curve(0.5);
        // Midpoint of the bottom edge bulges below y = 0 as tension grows.
        assert!(round.point(0.125).y < tight.point(0.125).y);
    }

    #[test]
    fn closed_curve_is_periodic() {
        let curve = loop_curve(0.2);
        for i in 0..50 {
            let t = i as f64 / 50.0;
            assert_vec_close(curve.point_at(t), curve.point_at(t + 1.0), 1e-6);
            assert_vec_close(curve.point_at(t), curve.point_at(t - 3.0), 1e-6);
        }
    }

    #[test]
    fn tangent_is_continuous_across_the_seam() {
        let curve = loop_curve(0.2);
        let start = curve.tangent_at(0.0);
        let end = curve.tangent_at(1.0 - 1e-9);
        assert!(start.dot(end) > 0.999_999, "{start:?} vs {end:?}");
    }

    #[test]
    fn tangents_are_unit_even_where_the_derivative_vanishes() {
        let curve = loop_curve(0.0);
        for i in 0..=40 {
            let u = i as f64 / 40.0;
            assert!((curve.tangent_at(u).length() - 1.0).abs() < 1e-9);
        }
        // Tension 0 stops dead on the knot; the chord takes over.
        assert_vec_close(curve.tangent(0.0), Vec3::X, 1e-12);
    }

    #[test]
    fn uniform_samples_are_evenly_spaced() {
        let curve = loop_curve(0.5);
        let samples = curve.sample_uniform(40).expect("samples");
        assert_eq!(samples.len(), 40);

        let gaps: Vec<f64> = samples
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .collect();
        let min = gaps.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = gaps.iter().cloned().fold(0.0, f64::max);
        assert!(max / min < 1.05, "min {min} max {max}");
    }

    #[test]
    fn sampling_is_deterministic() {
        let curve = loop_curve(0.2);
        assert_eq!(curve.sample_uniform(25), curve.sample_uniform(25));
        assert_eq!(curve.sample_uniform(0), Err(InvalidInput::ZeroSamples));
    }

    #[test]
    fn open_curve_clamps_to_its_ends() {
        let curve = PathCurve::from_local_points(
            square(),
            false,
            SplineKind::CatmullRom { tension: 0.5 },
        )
        .expect("curve");
        assert_vec_close(curve.point_at(0.0), square()[0], 1e-9);
        assert_vec_close(curve.point_at(1.0), square()[3], 1e-9);
        assert_vec_close(curve.point_at(1.5), square()[3], 1e-9);
        assert_vec_close(curve.point_at(-0.5), square()[0], 1e-9);
    }
}
