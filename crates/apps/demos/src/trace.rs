//! Per-frame pose records written by `--trace-out`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use overlay::{FrameUpdate, LatLngAlt};
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub elapsed_ms: f64,
    pub progress: f64,
    /// Absent while the model is still loading.
    pub position: Option<[f64; 3]>,
    /// Quaternion as `[x, y, z, w]`.
    pub orientation: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<LatLngAlt>,
}

impl FrameRecord {
    pub fn from_update(frame: u64, elapsed_ms: f64, update: &FrameUpdate) -> Self {
        Self {
            frame,
            elapsed_ms,
            progress: update.progress,
            position: update.pose.map(|p| p.position.as_array()),
            orientation: update.pose.map(|p| p.orientation.as_array()),
            geo: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct TraceRecorder {
    records: Vec<FrameRecord>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FrameRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    pub fn write_to(&self, path: &Path) -> Result<(), DemoError> {
        let file = File::create(path).map_err(|source| DemoError::TraceWrite {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.records).map_err(DemoError::TraceEncode)?;
        writer.flush().map_err(|source| DemoError::TraceWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
