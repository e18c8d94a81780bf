//! Structured per-invocation records for external history logging
//!
//! One [`InvocationSummary`] captures everything a logger needs to write a
//! single row: the image, the parameters used, and the normalized records.
//! [`append_history`] writes it as one JSON line.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use sdv_core::{DetectionRecord, Mode};

use crate::error::Result;

/// A detection record flattened for export. Cuboid values are reported in
/// the wire contract's units (angles in degrees).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub kind: &'static str,
    pub label: String,
    pub values: Vec<f64>,
}

impl From<&DetectionRecord> for HistoryRecord {
    fn from(record: &DetectionRecord) -> Self {
        match record {
            DetectionRecord::Rect(b) => HistoryRecord {
                kind: "bbox_2d",
                label: b.label.clone(),
                values: vec![b.x1, b.y1, b.x2, b.y2],
            },
            DetectionRecord::Cuboid(b) => HistoryRecord {
                kind: "bbox_3d",
                label: b.label.clone(),
                values: vec![
                    b.center.x,
                    b.center.y,
                    b.center.z,
                    b.size.x,
                    b.size.y,
                    b.size.z,
                    b.rotation.roll.to_degrees(),
                    b.rotation.pitch.to_degrees(),
                    b.rotation.yaw.to_degrees(),
                ],
            },
        }
    }
}

/// Everything one detection invocation produced, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationSummary {
    pub image: String,
    pub mode: &'static str,
    pub fov_degrees: f64,
    pub used_fallback: bool,
    pub skipped: usize,
    pub records: Vec<HistoryRecord>,
}

impl InvocationSummary {
    pub fn new(
        image: impl Into<String>,
        mode: Mode,
        fov_degrees: f64,
        used_fallback: bool,
        skipped: usize,
        records: &[DetectionRecord],
    ) -> Self {
        Self {
            image: image.into(),
            mode: mode.as_str(),
            fov_degrees,
            used_fallback,
            skipped,
            records: records.iter().map(HistoryRecord::from).collect(),
        }
    }
}

/// Append one JSON line per invocation to the history file, creating it on
/// first use.
pub fn append_history<P: AsRef<Path>>(path: P, summary: &InvocationSummary) -> Result<()> {
    let line = serde_json::to_string(summary)
        .map_err(|e| crate::error::IoError::HistoryWrite(std::io::Error::other(e)))?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "{line}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use sdv_core::{Box2D, Box3D, Orientation};

    #[test]
    fn test_history_record_from_rect() {
        let record = DetectionRecord::Rect(Box2D::new(10.0, 20.0, 50.0, 60.0, "cat"));
        let hist = HistoryRecord::from(&record);
        assert_eq!(hist.kind, "bbox_2d");
        assert_eq!(hist.label, "cat");
        assert_eq!(hist.values, vec![10.0, 20.0, 50.0, 60.0]);
    }

    #[test]
    fn test_history_record_from_cuboid_reports_degrees() {
        let record = DetectionRecord::Cuboid(Box3D::new(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::new(1.0, 1.0, 1.0),
            Orientation::from_degrees(0.0, 0.0, 90.0),
            "chair",
        ));
        let hist = HistoryRecord::from(&record);
        assert_eq!(hist.kind, "bbox_3d");
        assert!((hist.values[8] - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_append_history_writes_one_line_per_call() {
        let path = std::env::temp_dir().join(format!("sdv-history-{}.jsonl", std::process::id()));
        std::fs::remove_file(&path).ok();

        let records = vec![DetectionRecord::Rect(Box2D::new(0.0, 0.0, 5.0, 5.0, "cat"))];
        let summary = InvocationSummary::new("img.jpg", Mode::Detect2d, 60.0, true, 0, &records);

        append_history(&path, &summary).unwrap();
        append_history(&path, &summary).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["image"], "img.jpg");
        assert_eq!(parsed["mode"], "2d");
        assert_eq!(parsed["used_fallback"], true);
        assert_eq!(parsed["records"][0]["label"], "cat");

        std::fs::remove_file(path).ok();
    }
}
