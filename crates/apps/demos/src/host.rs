//! Frame loop standing in for the map's render callback.

use std::time::Duration;

use overlay::{MapCamera, OverlayView, ViewportSize};
use runtime::{Frame, FrameClock};
use tracing::{debug, info, trace};

use crate::error::DemoError;

/// Pause between fixed-step frames so spawned loader tasks get to run.
pub const FIXED_STEP_PAUSE: Duration = Duration::from_millis(1);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoopOptions {
    pub frames: u64,
    pub fps: f64,
    /// Pace frames and read elapsed time from the wall clock.
    pub realtime: bool,
    /// Surface size reported to the view before each frame.
    pub viewport: Option<ViewportSize>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            frames: 720,
            fps: 60.0,
            realtime: false,
            viewport: None,
        }
    }
}

/// Overlay anchored at the camera's center, as the demos place it.
pub fn overlay_view(camera: MapCamera, viewport: ViewportSize) -> OverlayView {
    OverlayView::new(camera.center, camera, viewport)
}

/// Per-frame scene logic driven by [`run_frames`].
pub trait FrameHandler {
    fn on_frame(
        &mut self,
        view: &mut OverlayView,
        frame: Frame,
        elapsed_ms: f64,
    ) -> Result<(), DemoError>;

    /// Called once after the last frame, including when a frame failed.
    fn teardown(&mut self, _view: &mut OverlayView) {}
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub repaints: u64,
}

/// Runs `options.frames` frames, repainting whenever the view asks for it.
///
/// Must be awaited on a tokio runtime; the loop yields between frames so that
/// loader tasks spawned by the handler make progress.
pub async fn run_frames<H: FrameHandler + ?Sized>(
    view: &mut OverlayView,
    handler: &mut H,
    options: LoopOptions,
) -> Result<LoopSummary, DemoError> {
    if !(options.fps.is_finite() && options.fps > 0.0) {
        return Err(DemoError::BadFrameRate(options.fps));
    }
    let clock = if options.realtime {
        FrameClock::wall()
    } else {
        FrameClock::Fixed
    };

    let mut summary = LoopSummary::default();
    let result = drive(view, handler, options, clock, &mut summary).await;
    handler.teardown(view);

    info!(
        frames = summary.frames,
        repaints = summary.repaints,
        redraw_requests = view.redraw_requests(),
        fixed_step = clock.is_fixed(),
        "frame loop finished"
    );
    result.map(|()| summary)
}

async fn drive<H: FrameHandler + ?Sized>(
    view: &mut OverlayView,
    handler: &mut H,
    options: LoopOptions,
    clock: FrameClock,
    summary: &mut LoopSummary,
) -> Result<(), DemoError> {
    let mut frame = Frame::at_rate(0, options.fps);
    for _ in 0..options.frames {
        if let Some(size) = options.viewport {
            view.resize(size);
        }
        let elapsed_ms = clock.elapsed_ms(frame);
        handler.on_frame(view, frame, elapsed_ms)?;
        summary.frames += 1;

        if view.take_redraw() {
            repaint(view, frame);
            summary.repaints += 1;
        }

        let pause = if options.realtime {
            Duration::from_secs_f64(frame.dt_s)
        } else {
            FIXED_STEP_PAUSE
        };
        tokio::time::sleep(pause).await;
        frame = frame.next();
    }
    Ok(())
}

fn repaint(view: &OverlayView, frame: Frame) {
    let drawables = view.scene().drawables_3d();
    trace!(frame = frame.index, drawables = drawables.len(), "repaint");
    if frame.index == 0 {
        debug!(
            viewport = ?view.viewport_size().as_array(),
            meters_per_pixel = view.camera().meters_per_pixel(),
            "first repaint"
        );
    }
}

#[cfg(test)]
mod tests {
    use foundation::math::Vec3;
    use overlay::{LatLngAlt, MapCamera, OverlayView, ViewportSize};
    use runtime::{Frame, RequestRedraw};
    use scene::components::{Drawable3D, LineMaterial, Shape3D, Transform};

    use super::{FrameHandler, LoopOptions, LoopSummary, overlay_view, run_frames};
    use crate::error::DemoError;

    fn view() -> OverlayView {
        let camera = MapCamera {
            center: LatLngAlt::new(37.42, -122.08),
            zoom: 18.0,
            tilt: 0.0,
            heading: 0.0,
        };
        overlay_view(camera, ViewportSize::new(640, 480))
    }

    #[derive(Default)]
    struct EveryOther {
        seen: Vec<f64>,
        torn_down: bool,
        fail_at: Option<u64>,
    }

    impl FrameHandler for EveryOther {
        fn on_frame(
            &mut self,
            view: &mut OverlayView,
            frame: Frame,
            elapsed_ms: f64,
        ) -> Result<(), DemoError> {
            if self.fail_at == Some(frame.index) {
                return Err(DemoError::BadFrameRate(-1.0));
            }
            self.seen.push(elapsed_ms);
            if frame.index % 2 == 0 {
                view.request_redraw();
            }
            Ok(())
        }

        fn teardown(&mut self, _view: &mut OverlayView) {
            self.torn_down = true;
        }
    }

    #[tokio::test]
    async fn fixed_step_elapsed_follows_frame_index() {
        let mut view = view();
        let mut handler = EveryOther::default();
        let options = LoopOptions {
            frames: 4,
            fps: 4.0,
            realtime: false,
            viewport: None,
        };
        let summary = run_frames(&mut view, &mut handler, options).await.unwrap();

        assert_eq!(summary, LoopSummary { frames: 4, repaints: 2 });
        assert_eq!(handler.seen, vec![0.0, 250.0, 500.0, 750.0]);
        assert!(handler.torn_down);
    }

    struct Idle;

    impl FrameHandler for Idle {
        fn on_frame(&mut self, _: &mut OverlayView, _: Frame, _: f64) -> Result<(), DemoError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn reported_viewport_reaches_line_materials_once() {
        let mut view = view();
        let material = LineMaterial {
            color: 0x0f9d58,
            width_px: 5.0,
            resolution: [0, 0],
        };
        let line = Drawable3D::line(vec![Vec3::ZERO, Vec3::X], material);
        let entity = view.add_to_scene(Transform::identity(), line);
        assert!(view.take_redraw());

        let options = LoopOptions {
            frames: 3,
            viewport: Some(ViewportSize::new(1920, 1080)),
            ..LoopOptions::default()
        };
        let summary = run_frames(&mut view, &mut Idle, options).await.unwrap();

        assert_eq!(summary.repaints, 1);
        assert_eq!(view.redraw_requests(), 2);
        assert_eq!(view.viewport_size(), ViewportSize::new(1920, 1080));
        let drawable = view.scene().drawable_3d(entity).unwrap();
        assert!(matches!(
            drawable.shape,
            Shape3D::Line { material, .. } if material.resolution == [1920, 1080]
        ));
    }

    #[tokio::test]
    async fn failing_frame_still_tears_down() {
        let mut view = view();
        let mut handler = EveryOther {
            fail_at: Some(2),
            ..EveryOther::default()
        };
        let err = run_frames(&mut view, &mut handler, LoopOptions::default()).await.unwrap_err();

        assert!(matches!(err, DemoError::BadFrameRate(_)));
        assert_eq!(handler.seen.len(), 2);
        assert!(handler.torn_down);
    }

    #[tokio::test]
    async fn rejects_non_positive_frame_rate() {
        let mut view = view();
        let mut handler = EveryOther::default();
        let options = LoopOptions {
            fps: 0.0,
            ..LoopOptions::default()
        };
        let err = run_frames(&mut view, &mut handler, options).await.unwrap_err();
        assert!(matches!(err, DemoError::BadFrameRate(f) if f == 0.0));
        assert!(handler.seen.is_empty());
    }
}
