//! Payload parsing and flat-file I/O for the detection visualizer

pub mod calibration;
pub mod detections;
pub mod error;
pub mod history;

pub use calibration::{CalibrationRecord, CalibrationSet, load_calibration, lookup_calibration};
pub use detections::{
    DEFAULT_LABEL, ParsedDetections, RawDetections, normalize, normalize_with_label,
};
pub use error::{IoError, Result};
pub use history::{HistoryRecord, InvocationSummary, append_history};

// Re-export from sdv-core for convenience
pub use sdv_core::{DetectionRecord, Mode};
