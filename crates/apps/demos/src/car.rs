//! A car model looping along a smoothed track.
//!
//! The track is drawn immediately; the car appears once its model has
//! loaded and from then on follows the path, nose along the tangent.

use assets::{AssetLoader, ModelAsset};
use foundation::math::{Quat, Vec3};
use overlay::{AnimationDriver, OverlayView, PathCurve, TrackLine};
use runtime::Frame;
use scene::EntityId;
use scene::components::{Drawable3D, Transform};
use tracing::{debug, info, warn};

use crate::config::CarConfig;
use crate::error::DemoError;
use crate::host::{FrameHandler, LoopOptions, LoopSummary, overlay_view, run_frames};
use crate::trace::{FrameRecord, TraceRecorder};

/// Rotation for Euler angles `(x, y, z)` in degrees applied in Z-X-Y order.
pub fn euler_zxy_deg(angles: [f64; 3]) -> Quat {
    let [x, y, z] = angles.map(f64::to_radians);
    Quat::from_axis_angle(Vec3::Z, z)
        * Quat::from_axis_angle(Vec3::X, x)
        * Quat::from_axis_angle(Vec3::Y, y)
}

#[derive(Debug)]
pub struct CarScene {
    driver: AnimationDriver<ModelAsset>,
    track: EntityId,
    car: Option<EntityId>,
    scale: f64,
    base_rotation: Quat,
    trace: TraceRecorder,
}

impl CarScene {
    /// Builds the path and track, adds the track to the view and starts
    /// loading the car model.
    pub fn setup<L: AssetLoader<Asset = ModelAsset> + ?Sized>(
        view: &mut OverlayView,
        config: &CarConfig,
        loader: &mut L,
    ) -> Result<Self, DemoError> {
        let curve = PathCurve::build(view, &config.waypoints, true, config.track.smoothing)?;
        let track = TrackLine::build(&curve, config.track.density, config.track.style)?;
        info!(
            waypoints = curve.waypoint_count(),
            length_m = curve.length(),
            samples = track.len(),
            "track built"
        );
        let drawable = track.to_drawable(view.viewport_size());
        let track = view.add_to_scene(Transform::identity(), drawable);

        let pending = loader.load_model(&config.model.url);
        debug!(url = %config.model.url, request = ?pending.request(), "model requested");
        let driver = AnimationDriver::new(curve, config.animation.to_config(), pending)?;

        Ok(Self {
            driver,
            track,
            car: None,
            scale: config.model.scale,
            base_rotation: euler_zxy_deg(config.model.rotation_deg),
            trace: TraceRecorder::new(),
        })
    }

    pub fn driver(&self) -> &AnimationDriver<ModelAsset> {
        &self.driver
    }

    pub fn track(&self) -> EntityId {
        self.track
    }

    /// The car entity, once the model has arrived.
    pub fn car(&self) -> Option<EntityId> {
        self.car
    }

    pub fn trace(&self) -> &TraceRecorder {
        &self.trace
    }
}

impl FrameHandler for CarScene {
    fn on_frame(
        &mut self,
        view: &mut OverlayView,
        frame: Frame,
        elapsed_ms: f64,
    ) -> Result<(), DemoError> {
        let update = self.driver.update(elapsed_ms, view)?;
        let mut record = FrameRecord::from_update(frame.index, elapsed_ms, &update);
        record.geo = update.pose.map(|p| view.unproject(p.position));
        self.trace.push(record);

        let Some(pose) = update.pose else {
            return Ok(());
        };
        let transform = Transform::translate(pose.position)
            .with_rotation(pose.orientation * self.base_rotation)
            .with_scale(self.scale);

        match self.car {
            Some(car) => view.scene_mut().set_transform(car, transform),
            None => {
                let source = match self.driver.asset() {
                    Some(model) => {
                        info!(
                            url = %model.url,
                            bytes = model.byte_len(),
                            frame = frame.index,
                            "model ready"
                        );
                        model.url.clone()
                    }
                    None => String::new(),
                };
                self.car = Some(view.add_to_scene(transform, Drawable3D::model(source)));
            }
        }
        Ok(())
    }

    fn teardown(&mut self, _view: &mut OverlayView) {
        if self.driver.cancel_pending() {
            warn!("car model still loading at shutdown, request cancelled");
        }
    }
}

#[derive(Debug)]
pub struct CarRun {
    pub view: OverlayView,
    pub scene: CarScene,
    pub summary: LoopSummary,
}

/// Sets up the car scene and runs the host loop over it.
pub async fn run<L: AssetLoader<Asset = ModelAsset> + ?Sized>(
    config: &CarConfig,
    loader: &mut L,
    options: LoopOptions,
) -> Result<CarRun, DemoError> {
    let mut view = overlay_view(config.camera, config.viewport);
    let mut scene = CarScene::setup(&mut view, config, loader)?;
    let summary = run_frames(&mut view, &mut scene, options).await?;
    Ok(CarRun { view, scene, summary })
}
