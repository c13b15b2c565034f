use super::{Ecef, Geodetic, Vec3, ecef_to_geodetic, geodetic_to_ecef};

/// Local East-North-Up coordinates (meters).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    /// Scene axes: x = east, y = north, z = up.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.east, self.north, self.up)
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// A tangent-plane frame anchored at a geodetic origin.
///
/// Caches the origin's ECEF position and trig terms so repeated conversions
/// only pay for the rotation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnuFrame {
    origin: Geodetic,
    origin_ecef: Ecef,
    sin_lat: f64,
    cos_lat: f64,
    sin_lon: f64,
    cos_lon: f64,
}

impl EnuFrame {
    pub fn new(origin: Geodetic) -> Self {
        let (sin_lat, cos_lat) = origin.lat_rad.sin_cos();
        let (sin_lon, cos_lon) = origin.lon_rad.sin_cos();
        Self {
            origin,
            origin_ecef: geodetic_to_ecef(origin),
            sin_lat,
            cos_lat,
            sin_lon,
            cos_lon,
        }
    }

    pub fn origin(&self) -> Geodetic {
        self.origin
    }

    pub fn ecef_to_enu(&self, point: Ecef) -> Enu {
        let dx = point.x - self.origin_ecef.x;
        let dy = point.y - self.origin_ecef.y;
        let dz = point.z - self.origin_ecef.z;
        let (sl, cl, so, co) = (self.sin_lat, self.cos_lat, self.sin_lon, self.cos_lon);

        Enu::new(
            -so * dx + co * dy,
            -sl * co * dx - sl * so * dy + cl * dz,
            cl * co * dx + cl * so * dy + sl * dz,
        )
    }

    pub fn enu_to_ecef(&self, enu: Enu) -> Ecef {
        let (sl, cl, so, co) = (self.sin_lat, self.cos_lat, self.sin_lon, self.cos_lon);

        let dx = -so * enu.east - sl * co * enu.north + cl * co * enu.up;
        let dy = co * enu.east - sl * so * enu.north + cl * so * enu.up;
        let dz = cl * enu.north + sl * enu.up;

        Ecef::new(
            self.origin_ecef.x + dx,
            self.origin_ecef.y + dy,
            self.origin_ecef.z + dz,
        )
    }

    pub fn geodetic_to_enu(&self, geo: Geodetic) -> Enu {
        self.ecef_to_enu(geodetic_to_ecef(geo))
    }

    pub fn enu_to_geodetic(&self, enu: Enu) -> Geodetic {
        ecef_to_geodetic(self.enu_to_ecef(enu))
    }
}
