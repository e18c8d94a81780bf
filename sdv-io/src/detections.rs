//! Normalization of model detection payloads into canonical records

use nalgebra::Vector3;
use serde_json::Value;
use tracing::warn;

use sdv_core::{Box2D, Box3D, DetectionRecord, Mode, Orientation};

use crate::error::{IoError, Result};

/// Label substituted when a record carries none.
pub const DEFAULT_LABEL: &str = "object";

/// Wire angles are degrees; anything beyond a full turn is treated as a
/// unit mix-up rather than a real orientation.
const MAX_ANGLE_DEGREES: f64 = 360.0;

/// Raw detection payload as handed over by the model client.
///
/// The two representations are resolved here, once; downstream code only
/// ever sees `DetectionRecord`.
#[derive(Debug, Clone)]
pub enum RawDetections {
    /// JSON text straight from the model response.
    Json(String),
    /// Already-decoded JSON value (single mapping or sequence of mappings).
    Value(Value),
}

impl From<&str> for RawDetections {
    fn from(text: &str) -> Self {
        RawDetections::Json(text.to_string())
    }
}

impl From<Value> for RawDetections {
    fn from(value: Value) -> Self {
        RawDetections::Value(value)
    }
}

/// Outcome of a normalization pass. Malformed individual records are
/// skipped, not fatal; `skipped` reports how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDetections {
    pub records: Vec<DetectionRecord>,
    pub skipped: usize,
}

/// Normalize a raw payload into canonical detection records.
///
/// Accepts a JSON string, a single mapping, or a sequence of mappings, and
/// treats them equivalently. Individual records that are malformed (missing
/// the mode's bbox key, wrong arity, non-numeric values, implausible angles)
/// are skipped with a warning and counted. Only a payload that is unusable
/// as a whole (unparsable JSON, not an object or array) fails the batch.
pub fn normalize(raw: &RawDetections, mode: Mode) -> Result<ParsedDetections> {
    normalize_with_label(raw, mode, DEFAULT_LABEL)
}

/// Like [`normalize`], with a caller-chosen placeholder label.
pub fn normalize_with_label(
    raw: &RawDetections,
    mode: Mode,
    default_label: &str,
) -> Result<ParsedDetections> {
    let decoded;
    let value: &Value = match raw {
        RawDetections::Json(text) => {
            decoded = serde_json::from_str::<Value>(text)
                .map_err(|e| IoError::malformed(format!("invalid JSON: {e}"), text))?;
            &decoded
        }
        RawDetections::Value(value) => value,
    };

    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        other => {
            return Err(IoError::malformed(
                "expected a mapping or a sequence of mappings",
                other,
            ));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;

    for item in items {
        match parse_record(item, mode, default_label) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed detection record");
                skipped += 1;
            }
        }
    }

    Ok(ParsedDetections { records, skipped })
}

fn parse_record(item: &Value, mode: Mode, default_label: &str) -> Result<DetectionRecord> {
    let obj = item
        .as_object()
        .ok_or_else(|| IoError::malformed("record is not a mapping", item))?;

    let label = match obj.get("label") {
        None | Some(Value::Null) => default_label.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    match mode {
        Mode::Detect2d => {
            let bbox = obj
                .get("bbox_2d")
                .ok_or_else(|| IoError::malformed("missing bbox_2d", item))?;
            let v = numeric_array(bbox, 4, item)?;
            Ok(DetectionRecord::Rect(Box2D::new(
                v[0], v[1], v[2], v[3], label,
            )))
        }
        Mode::Detect3d => {
            let bbox = obj
                .get("bbox_3d")
                .ok_or_else(|| IoError::malformed("missing bbox_3d", item))?;
            // [xc, yc, zc, dx, dy, dz, roll, pitch, yaw], angles in degrees
            let v = numeric_array(bbox, 9, item)?;

            for angle in &v[6..9] {
                if angle.abs() > MAX_ANGLE_DEGREES {
                    return Err(IoError::malformed(
                        format!("rotation angle {angle} out of range (degrees expected)"),
                        item,
                    ));
                }
            }

            Ok(DetectionRecord::Cuboid(Box3D::new(
                Vector3::new(v[0], v[1], v[2]),
                Vector3::new(v[3], v[4], v[5]),
                Orientation::from_degrees(v[6], v[7], v[8]),
                label,
            )))
        }
    }
}

fn numeric_array(value: &Value, arity: usize, context: &Value) -> Result<Vec<f64>> {
    let arr = value
        .as_array()
        .ok_or_else(|| IoError::malformed("bbox is not an array", context))?;

    if arr.len() != arity {
        return Err(IoError::malformed(
            format!("expected {arity} bbox values, got {}", arr.len()),
            context,
        ));
    }

    arr.iter().map(|v| coerce_f64(v, context)).collect()
}

fn coerce_f64(value: &Value, context: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| IoError::malformed("non-finite bbox value", context)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| IoError::malformed(format!("non-numeric bbox value {s:?}"), context)),
        other => Err(IoError::malformed(
            format!("non-numeric bbox value {other}"),
            context,
        )),
    }
}
