//! A static cube standing on the map center.

use overlay::{GeoProjection, OverlayView};
use runtime::Frame;
use scene::EntityId;
use scene::components::{Drawable3D, Transform};
use tracing::info;

use crate::config::CubeConfig;
use crate::error::DemoError;
use crate::host::{FrameHandler, LoopOptions, LoopSummary, overlay_view, run_frames};

#[derive(Debug)]
pub struct CubeScene {
    cube: EntityId,
}

impl CubeScene {
    pub fn setup(view: &mut OverlayView, config: &CubeConfig) -> Self {
        let base = config.camera.center.with_altitude(config.cube.altitude);
        let position = view.project(base);
        let cube = view.add_to_scene(
            Transform::translate(position),
            Drawable3D::cube(config.cube.size, config.cube.color),
        );
        info!(size = config.cube.size, altitude = config.cube.altitude, "cube placed");
        Self { cube }
    }

    pub fn cube(&self) -> EntityId {
        self.cube
    }
}

impl FrameHandler for CubeScene {
    fn on_frame(
        &mut self,
        _view: &mut OverlayView,
        _frame: Frame,
        _elapsed_ms: f64,
    ) -> Result<(), DemoError> {
        Ok(())
    }
}

pub async fn run(
    config: &CubeConfig,
    options: LoopOptions,
) -> Result<(OverlayView, LoopSummary), DemoError> {
    let mut view = overlay_view(config.camera, config.viewport);
    let mut scene = CubeScene::setup(&mut view, config);
    let summary = run_frames(&mut view, &mut scene, options).await?;
    Ok((view, summary))
}
