//! Per-frame animation of an object along a [`PathCurve`].
//!
//! Progress is derived from elapsed time modulo the loop duration rather than
//! accumulated, so any two calls with the same elapsed time (mod the loop)
//! produce the same pose.

use assets::{LoadError, LoadState, PendingAsset};
use foundation::math::{Quat, Vec3};
use runtime::RequestRedraw;

use crate::curve::PathCurve;
use crate::error::InvalidInput;

pub const DEFAULT_LOOP_DURATION_MS: f64 = 12_000.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationConfig {
    pub loop_duration_ms: f64,
    /// Direction the animated model faces in its own frame.
    pub forward: Vec3,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            loop_duration_ms: DEFAULT_LOOP_DURATION_MS,
            forward: Vec3::Y,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

/// Where along the loop the object is this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationState {
    pub progress: f64,
    pub position: Vec3,
    pub tangent: Vec3,
}

/// Result of one [`AnimationDriver::update`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameUpdate {
    pub progress: f64,
    pub state: Option<AnimationState>,
    pub pose: Option<Pose>,
    /// Set on the single update where the asset became available.
    pub asset_arrived: bool,
}

impl FrameUpdate {
    fn waiting(progress: f64) -> Self {
        Self {
            progress,
            state: None,
            pose: None,
            asset_arrived: false,
        }
    }
}

#[derive(Debug)]
pub enum DriverState<A> {
    WaitingForAsset(PendingAsset<A>),
    Animating(A),
}

#[derive(Debug)]
pub struct AnimationDriver<A> {
    curve: PathCurve,
    loop_duration_ms: f64,
    forward: Vec3,
    state: DriverState<A>,
    progress: f64,
}

impl<A> AnimationDriver<A> {
    /// Driver that waits for `pending` before moving anything.
    pub fn new(
        curve: PathCurve,
        config: AnimationConfig,
        pending: PendingAsset<A>,
    ) -> Result<Self, InvalidInput> {
        Self::with_state(curve, config, DriverState::WaitingForAsset(pending))
    }

    /// Driver for an asset that is already available.
    pub fn with_asset(
        curve: PathCurve,
        config: AnimationConfig,
        asset: A,
    ) -> Result<Self, InvalidInput> {
        Self::with_state(curve, config, DriverState::Animating(asset))
    }

    fn with_state(
        curve: PathCurve,
        config: AnimationConfig,
        state: DriverState<A>,
    ) -> Result<Self, InvalidInput> {
        let loop_ms = config.loop_duration_ms;
        if !(loop_ms.is_finite() && loop_ms > 0.0) {
            return Err(InvalidInput::BadLoopDuration(loop_ms));
        }
        let forward = config.forward.try_normalize().ok_or(InvalidInput::ZeroForward)?;

        Ok(Self {
            curve,
            loop_duration_ms: loop_ms,
            forward,
            state,
            progress: 0.0,
        })
    }

    pub fn curve(&self) -> &PathCurve {
        &self.curve
    }

    pub fn state(&self) -> &DriverState<A> {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, DriverState::Animating(_))
    }

    pub fn asset(&self) -> Option<&A> {
        match &self.state {
            DriverState::Animating(asset) => Some(asset),
            DriverState::WaitingForAsset(_) => None,
        }
    }

    pub fn load_state(&self) -> LoadState {
        match &self.state {
            DriverState::Animating(_) => LoadState::Ready,
            DriverState::WaitingForAsset(pending) => pending.state(),
        }
    }

    /// Progress computed by the most recent update.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Normalized position in the loop, in `[0, 1)`.
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        if !elapsed_ms.is_finite() {
            return 0.0;
        }
        let p = elapsed_ms.rem_euclid(self.loop_duration_ms) / self.loop_duration_ms;
        if p >= 1.0 { 0.0 } else { p }
    }

    /// Pose at `progress`, orienting `forward` along the path.
    pub fn pose_at(&self, progress: f64) -> (AnimationState, Pose) {
        let position = self.curve.point_at(progress);
        let tangent = self.curve.tangent_at(progress);
        let state = AnimationState {
            progress,
            position,
            tangent,
        };
        let pose = Pose {
            position,
            orientation: Quat::from_unit_vectors(self.forward, tangent),
        };
        (state, pose)
    }

    /// Advance to `elapsed_ms`.
    ///
    /// While the asset is still loading only the progress is recorded; no pose
    /// is produced and no redraw requested. Once animating, exactly one redraw
    /// is requested per call. A failed load is returned once, after which the
    /// driver keeps waiting.
    pub fn update<R: RequestRedraw + ?Sized>(
        &mut self,
        elapsed_ms: f64,
        redraw: &mut R,
    ) -> Result<FrameUpdate, LoadError> {
        self.progress = self.progress_at(elapsed_ms);

        let mut asset_arrived = false;
        if let DriverState::WaitingForAsset(pending) = &mut self.state {
            match pending.try_take() {
                None => return Ok(FrameUpdate::waiting(self.progress)),
                Some(Err(e)) => return Err(e),
                Some(Ok(asset)) => {
                    self.state = DriverState::Animating(asset);
                    asset_arrived = true;
                }
            }
        }

        let (state, pose) = self.pose_at(self.progress);
        redraw.request_redraw();
        Ok(FrameUpdate {
            progress: self.progress,
            state: Some(state),
            pose: Some(pose),
            asset_arrived,
        })
    }

    /// Abandon an outstanding load, e.g. on teardown.
    ///
    /// Returns `true` if a load was pending.
    pub fn cancel_pending(&mut self) -> bool {
        match &mut self.state {
            DriverState::WaitingForAsset(pending) => pending.cancel(),
            DriverState::Animating(_) => false,
        }
    }
}
