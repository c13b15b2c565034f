use foundation::math::{Enu, EnuFrame, Geodetic, Vec3};
use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees, altitude in meters above the ellipsoid.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngAlt {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub altitude: f64,
}

impl LatLngAlt {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            altitude: 0.0,
        }
    }

    pub fn with_altitude(self, altitude: f64) -> Self {
        Self { altitude, ..self }
    }

    pub fn to_geodetic(self) -> Geodetic {
        Geodetic::from_degrees(self.lat, self.lng, self.altitude)
    }

    pub fn from_geodetic(geo: Geodetic) -> Self {
        Self {
            lat: geo.lat_rad.to_degrees(),
            lng: geo.lon_rad.to_degrees(),
            altitude: geo.alt_m,
        }
    }
}

/// Converts geographic coordinates into the scene-local frame.
pub trait GeoProjection {
    fn project(&self, coord: LatLngAlt) -> Vec3;
}

/// Tangent-plane projection anchored at the overlay origin.
///
/// Scene axes: x = east, y = north, z = up, in meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnuProjection {
    anchor: LatLngAlt,
    frame: EnuFrame,
}

impl EnuProjection {
    pub fn new(anchor: LatLngAlt) -> Self {
        Self {
            anchor,
            frame: EnuFrame::new(anchor.to_geodetic()),
        }
    }

    pub fn anchor(&self) -> LatLngAlt {
        self.anchor
    }

    /// Inverse of [`GeoProjection::project`].
    pub fn unproject(&self, local: Vec3) -> LatLngAlt {
        LatLngAlt::from_geodetic(self.frame.enu_to_geodetic(Enu::from_vec3(local)))
    }
}

impl GeoProjection for EnuProjection {
    fn project(&self, coord: LatLngAlt) -> Vec3 {
        self.frame.geodetic_to_enu(coord.to_geodetic()).to_vec3()
    }
}

#[cfg(test)]
mod tests {
    use super::{EnuProjection, GeoProjection, LatLngAlt};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn anchor_projects_to_origin() {
        let anchor = LatLngAlt::new(37.4217845, -122.0847413);
        let p = EnuProjection::new(anchor).project(anchor);
        assert!(p.length() < 1e-6);
    }

    #[test]
    fn altitude_becomes_up() {
        let anchor = LatLngAlt::new(37.4217845, -122.0847413);
        let p = EnuProjection::new(anchor).project(anchor.with_altitude(8.0));
        assert_close(p.z, 8.0, 1e-6);
        assert_close(p.x, 0.0, 1e-6);
    }

    #[test]
    fn north_is_positive_y() {
        let proj = EnuProjection::new(LatLngAlt::new(37.4217845, -122.0847413));
        let p = proj.project(LatLngAlt::new(37.4227845, -122.0847413));
        assert!(p.y > 100.0 && p.y < 120.0, "{p:?}");
    }

    #[test]
    fn unproject_inverts_project() {
        let proj = EnuProjection::new(LatLngAlt::new(37.4217845, -122.0847413));
        let coord = LatLngAlt::new(37.421096, -122.0820986).with_altitude(2.0);
        let back = proj.unproject(proj.project(coord));
        assert_close(back.lat, coord.lat, 1e-10);
        assert_close(back.lng, coord.lng, 1e-10);
        assert_close(back.altitude, coord.altitude, 1e-6);
    }

    #[test]
    fn altitude_defaults_to_zero_when_deserializing() {
        let c: LatLngAlt = serde_json::from_str(r#"{"lat": 1.0, "lng": 2.0}"#).expect("parse");
        assert_eq!(c, LatLngAlt::new(1.0, 2.0));
    }
}
