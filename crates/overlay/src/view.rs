use foundation::math::Vec3;
use runtime::{RedrawRequests, RequestRedraw};
use scene::EntityId;
use scene::World;
use scene::components::{Drawable3D, Transform};
use serde::{Deserialize, Serialize};

use crate::projection::{EnuProjection, GeoProjection, LatLngAlt};

/// Web-mercator ground resolution at the equator for zoom 0 (m/px).
const MERCATOR_M_PER_PX_Z0: f64 = 156_543.033_92;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_array(self) -> [u32; 2] {
        [self.width, self.height]
    }
}

/// View parameters of the underlying map.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCamera {
    pub center: LatLngAlt,
    pub zoom: f64,
    /// Degrees from straight down.
    pub tilt: f64,
    /// Degrees clockwise from north.
    pub heading: f64,
}

impl MapCamera {
    pub fn meters_per_pixel(&self) -> f64 {
        MERCATOR_M_PER_PX_Z0 * self.center.lat.to_radians().cos() / 2f64.powf(self.zoom)
    }
}

/// A 3-D scene layered over a map, anchored at a geographic origin.
///
/// Owns the scene graph and the redraw flag; the host loop repaints whenever
/// [`OverlayView::take_redraw`] reports a pending request.
#[derive(Debug)]
pub struct OverlayView {
    camera: MapCamera,
    projection: EnuProjection,
    scene: World,
    viewport: ViewportSize,
    redraw: RedrawRequests,
}

impl OverlayView {
    pub fn new(anchor: LatLngAlt, camera: MapCamera, viewport: ViewportSize) -> Self {
        Self {
            camera,
            projection: EnuProjection::new(anchor),
            scene: World::new(),
            viewport,
            redraw: RedrawRequests::new(),
        }
    }

    pub fn camera(&self) -> &MapCamera {
        &self.camera
    }

    pub fn anchor(&self) -> LatLngAlt {
        self.projection.anchor()
    }

    pub fn unproject(&self, local: Vec3) -> LatLngAlt {
        self.projection.unproject(local)
    }

    pub fn scene(&self) -> &World {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut World {
        &mut self.scene
    }

    pub fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    /// Viewport changed: refresh line resolutions and repaint.
    pub fn resize(&mut self, size: ViewportSize) {
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        for material in self.scene.line_materials_mut() {
            material.resolution = size.as_array();
        }
        self.redraw.request_redraw();
    }

    pub fn add_to_scene(&mut self, transform: Transform, mut drawable: Drawable3D) -> EntityId {
        if let Some(material) = drawable.line_material_mut() {
            material.resolution = self.viewport.as_array();
        }
        let entity = self.scene.spawn();
        self.scene.set_transform(entity, transform);
        self.scene.set_drawable_3d(entity, drawable);
        self.redraw.request_redraw();
        entity
    }

    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    pub fn redraw_requests(&self) -> u64 {
        self.redraw.total()
    }
}

impl GeoProjection for OverlayView {
    fn project(&self, coord: LatLngAlt) -> Vec3 {
        self.projection.project(coord)
    }
}

impl RequestRedraw for OverlayView {
    fn request_redraw(&mut self) {
        self.redraw.request_redraw();
    }
}
