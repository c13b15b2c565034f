use std::env;
use std::path::PathBuf;

use clap::Args;
use overlay::ViewportSize;
use tracing_subscriber::EnvFilter;

use crate::host::LoopOptions;

/// Overrides the directory model urls are resolved against.
pub const ASSET_ROOT_ENV: &str = "DEMO_ASSET_ROOT";

/// Flags shared by every demo binary.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct DemoArgs {
    /// JSON file overriding the built-in scene parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames to run before exiting
    #[arg(long, default_value_t = 720)]
    pub frames: u64,

    /// Frame rate of the host loop
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,

    /// Pace frames against the wall clock instead of a fixed time step
    #[arg(long)]
    pub realtime: bool,

    /// Write per-frame poses to this file as JSON
    #[arg(long)]
    pub trace_out: Option<PathBuf>,

    /// Resize the overlay to WIDTHxHEIGHT before the first frame
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<ViewportSize>,
}

fn parse_viewport(s: &str) -> Result<ViewportSize, String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let width: u32 = w.trim().parse().map_err(|e| format!("width {w:?}: {e}"))?;
    let height: u32 = h.trim().parse().map_err(|e| format!("height {h:?}: {e}"))?;
    if width == 0 || height == 0 {
        return Err(format!("viewport must be non-empty, got {s:?}"));
    }
    Ok(ViewportSize::new(width, height))
}

impl DemoArgs {
    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            frames: self.frames,
            fps: self.fps,
            realtime: self.realtime,
            viewport: self.viewport,
        }
    }
}

pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// `$DEMO_ASSET_ROOT`, or the `assets/` directory shipped with the demos.
pub fn asset_root() -> PathBuf {
    env::var_os(ASSET_ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")))
}
