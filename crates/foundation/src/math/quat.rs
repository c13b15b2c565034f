use super::Vec3;

/// Unit quaternion rotation `(x, y, z, w)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn as_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Rotation of `angle_rad` around `axis` (need not be normalized).
    pub fn from_axis_angle(axis: Vec3, angle_rad: f64) -> Self {
        let Some(axis) = axis.try_normalize() else {
            return Self::IDENTITY;
        };
        let (s, c) = (angle_rad * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Shortest-arc rotation taking unit vector `from` onto unit vector `to`.
    ///
    /// For opposite vectors the rotation is 180° around `X × from`, or `Y × from`
    /// when `from` is parallel to X.
    pub fn from_unit_vectors(from: Vec3, to: Vec3) -> Self {
        let dot = from.dot(to).clamp(-1.0, 1.0);
        let axis = from.cross(to);

        // Within ~1e-8 rad of opposite the cross product no longer fixes an axis.
        if dot < 0.0 && axis.length_squared() < 1e-16 {
            let mut perp = Vec3::X.cross(from);
            if perp.length_squared() < 1e-12 {
                perp = Vec3::Y.cross(from);
            }
            let perp = perp.try_normalize().unwrap_or(Vec3::Z);
            return Self::new(perp.x, perp.y, perp.z, 0.0);
        }

        Self::new(axis.x, axis.y, axis.z, 1.0 + dot).normalize()
    }

    pub fn normalize(self) -> Self {
        let n = self.dot(self).sqrt();
        if n > 1e-10 {
            Self::new(self.x / n, self.y / n, self.z / n, self.w / n)
        } else {
            Self::IDENTITY
        }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotate `v` by this (unit) quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let qv = Vec3::new(self.x, self.y, self.z);
        let t = qv.cross(v) * 2.0;
        v + t * self.w + qv.cross(t)
    }

    /// Rotation angle in radians, in `[0, 2π]`.
    pub fn angle(self) -> f64 {
        2.0 * self.w.clamp(-1.0, 1.0).acos()
    }

    /// Rotation axis, or `None` for the identity.
    pub fn axis(self) -> Option<Vec3> {
        Vec3::new(self.x, self.y, self.z).try_normalize()
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hamilton product: `self * rhs` applies `rhs` first.
impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, b: Self) -> Self::Output {
        let a = self;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Quat;
    use crate::math::Vec3;

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        let diff = (a - b).length();
        assert!(diff <= eps, "expected {a:?} ~= {b:?} (diff {diff})");
    }

    #[test]
    fn identity_leaves_vectors_alone() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_close(Quat::IDENTITY.rotate(v), v, 1e-12);
    }

    #[test]
    fn from_unit_vectors_maps_from_onto_to() {
        let from = Vec3::X;
        let to = Vec3::new(0.0, 1.0, 1.0).try_normalize().expect("unit");
        let q = Quat::from_unit_vectors(from, to);
        assert_vec_close(q.rotate(from), to, 1e-9);
    }

    #[test]
    fn parallel_vectors_give_identity() {
        assert_eq!(Quat::from_unit_vectors(Vec3::Y, Vec3::Y), Quat::IDENTITY);
    }

    #[test]
    fn nearly_parallel_vectors_are_mapped_exactly() {
        let to = Vec3::new(1e-3, 1.0, 0.0).try_normalize().expect("unit");
        let q = Quat::from_unit_vectors(Vec3::Y, to);
        assert_vec_close(q.rotate(Vec3::Y), to, 1e-9);
        assert!((q.angle() - 1e-3).abs() < 1e-9);
    }

    #[test]
    fn nearly_opposite_vectors_are_mapped_exactly() {
        let to = Vec3::new(1e-3, -1.0, 0.0).try_normalize().expect("unit");
        let q = Quat::from_unit_vectors(Vec3::Y, to);
        assert_vec_close(q.rotate(Vec3::Y), to, 1e-9);
        assert!((q.angle() - (std::f64::consts::PI - 1e-3)).abs() < 1e-9);
    }

    #[test]
    fn rotation_is_continuous_across_the_parallel_band() {
        let mut last = Quat::from_unit_vectors(Vec3::Y, Vec3::Y);
        for i in 1..=20 {
            let offset = i as f64 * 1e-4;
            let to = Vec3::new(offset, 1.0, 0.0).try_normalize().expect("unit");
            let q = Quat::from_unit_vectors(Vec3::Y, to);
            assert_vec_close(q.rotate(Vec3::Y), to, 1e-12);
            assert!(q.dot(last).abs() > 1.0 - 1e-7, "jump at offset {offset}");
            last = q;
        }
    }

    #[test]
    fn opposite_vectors_give_half_turn_about_perpendicular_axis() {
        let q = Quat::from_unit_vectors(Vec3::Y, -Vec3::Y);
        assert!((q.angle() - std::f64::consts::PI).abs() < 1e-12);
        let axis = q.axis().expect("axis");
        assert!(axis.dot(Vec3::Y).abs() < 1e-12);
        assert_vec_close(q.rotate(Vec3::Y), -Vec3::Y, 1e-12);
    }

    #[test]
    fn opposite_x_falls_back_to_y_cross() {
        let q = Quat::from_unit_vectors(Vec3::X, -Vec3::X);
        assert!(q.x.is_finite() && q.y.is_finite() && q.z.is_finite());
        assert_vec_close(q.rotate(Vec3::X), -Vec3::X, 1e-12);
    }

    #[test]
    fn product_composes_rotations() {
        let quarter_z = Quat::from_axis_angle(Vec3::Z, std::f64::consts::FRAC_PI_2);
        let half_z = quarter_z * quarter_z;
        assert_vec_close(half_z.rotate(Vec3::X), -Vec3::X, 1e-12);
    }
}
