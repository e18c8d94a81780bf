//! Calibration file loading
//!
//! A calibration file is a JSON object mapping an identifier (typically the
//! image file name) to a record of intrinsics. A missing or unreadable file
//! is never fatal: lookup degrades to `None` and the caller falls back to
//! FOV synthesis.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use sdv_core::CameraIntrinsics;

use crate::error::{IoError, Result};

/// One persisted calibration entry. Reference dimensions are optional; when
/// absent the record is assumed to match the image it is looked up for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalibrationRecord {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl CalibrationRecord {
    /// Convert to intrinsics, filling in the reference dimensions from the
    /// requesting image when the record does not carry its own.
    pub fn to_intrinsics(&self, fallback_width: u32, fallback_height: u32) -> CameraIntrinsics {
        CameraIntrinsics::new(
            self.fx,
            self.fy,
            self.cx,
            self.cy,
            self.width.unwrap_or(fallback_width),
            self.height.unwrap_or(fallback_height),
        )
    }
}

pub type CalibrationSet = HashMap<String, CalibrationRecord>;

/// Load and parse a calibration file. Strict variant; most callers want
/// [`lookup_calibration`], which downgrades failures to a fallback.
pub fn load_calibration<P: AsRef<Path>>(path: P) -> Result<CalibrationSet> {
    let text = std::fs::read_to_string(&path).map_err(|e| {
        IoError::CalibrationLoad(format!("{}: {e}", path.as_ref().display()))
    })?;

    serde_json::from_str(&text)
        .map_err(|e| IoError::CalibrationLoad(format!("{}: {e}", path.as_ref().display())))
}

/// Look up the calibration entry for `key`, ready for the given image
/// dimensions. Any failure (file absent, unparsable, key missing) logs a
/// warning and returns `None` so the caller can synthesize intrinsics
/// instead.
pub fn lookup_calibration<P: AsRef<Path>>(
    path: P,
    key: &str,
    image_width: u32,
    image_height: u32,
) -> Option<CameraIntrinsics> {
    let set = match load_calibration(&path) {
        Ok(set) => set,
        Err(e) => {
            warn!(error = %e, "calibration unavailable, falling back to FOV synthesis");
            return None;
        }
    };

    match set.get(key) {
        Some(record) => {
            let cam = record.to_intrinsics(image_width, image_height);
            if cam.fx <= 0.0 || cam.fy <= 0.0 || cam.width == 0 || cam.height == 0 {
                warn!(key, "unusable calibration entry, falling back to FOV synthesis");
                return None;
            }
            Some(cam)
        }
        None => {
            warn!(key, "no calibration entry for image, falling back to FOV synthesis");
            None
        }
    }
}
