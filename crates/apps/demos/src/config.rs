use std::path::Path;

use foundation::math::Vec3;
use overlay::{
    AnimationConfig, LatLngAlt, MapCamera, TrackStyle, ViewportSize,
    curve::DEFAULT_SMOOTHING,
    driver::DEFAULT_LOOP_DURATION_MS,
    track::DEFAULT_TRACK_DENSITY,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

pub const MAP_CENTER: LatLngAlt = LatLngAlt {
    lat: 37.421_784_5,
    lng: -122.084_741_3,
    altitude: 0.0,
};

/// Loop the car drives around, clockwise from the south-west corner.
pub const CAR_WAYPOINTS: [(f64, f64); 10] = [
    (37.421_500, -122.084_500_0),
    (37.421_480, -122.083_041_3),
    (37.421_460, -122.082_401_3),
    (37.421_250, -122.082_250_0),
    (37.421_160, -122.082_100_0),
    (37.421_096, -122.082_098_6),
    (37.421_152, -122.082_108_6),
    (37.421_200, -122.082_198_6),
    (37.421_600, -122.082_250_0),
    (37.421_800, -122.082_280_0),
];

fn default_viewport() -> ViewportSize {
    ViewportSize::new(1280, 720)
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeParams {
    pub size: f64,
    pub color: u32,
    pub altitude: f64,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self {
            size: 8.0,
            color: 0x00ff00,
            altitude: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    pub camera: MapCamera,
    pub viewport: ViewportSize,
    pub cube: CubeParams,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            camera: MapCamera {
                center: MAP_CENTER,
                zoom: 18.0,
                tilt: 67.5,
                heading: 60.0,
            },
            viewport: default_viewport(),
            cube: CubeParams::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    pub loop_duration_ms: f64,
    /// Model-space axis the car's nose points along.
    pub forward: [f64; 3],
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            loop_duration_ms: DEFAULT_LOOP_DURATION_MS,
            forward: Vec3::Y.as_array(),
        }
    }
}

impl AnimationParams {
    pub fn to_config(self) -> AnimationConfig {
        AnimationConfig {
            loop_duration_ms: self.loop_duration_ms,
            forward: Vec3::from_array(self.forward),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackParams {
    /// Samples per waypoint.
    pub density: usize,
    pub smoothing: f64,
    pub style: TrackStyle,
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            density: DEFAULT_TRACK_DENSITY,
            smoothing: DEFAULT_SMOOTHING,
            style: TrackStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    pub url: String,
    pub scale: f64,
    /// Euler angles (x, y, z) in degrees, applied in Z-X-Y order.
    pub rotation_deg: [f64; 3],
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            url: "lowpoly-sedan.glb".to_string(),
            scale: 3.0,
            rotation_deg: [90.0, 0.0, 180.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    pub camera: MapCamera,
    pub viewport: ViewportSize,
    pub waypoints: Vec<LatLngAlt>,
    pub animation: AnimationParams,
    pub track: TrackParams,
    pub model: ModelParams,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            camera: MapCamera {
                center: MAP_CENTER,
                zoom: 18.0,
                tilt: 65.0,
                heading: 40.0,
            },
            viewport: default_viewport(),
            waypoints: CAR_WAYPOINTS
                .iter()
                .map(|&(lat, lng)| LatLngAlt::new(lat, lng))
                .collect(),
            animation: AnimationParams::default(),
            track: TrackParams::default(),
            model: ModelParams::default(),
        }
    }
}

/// Reads a JSON config, falling back to defaults when no path is given.
/// Keys missing from the file keep their default values.
pub fn load_config<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, DemoError> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DemoError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
