//! Rendering of detection records onto image rasters

pub mod color;
pub mod cube;
pub mod rect;
pub mod text;

pub use color::{color_for_label, contrast_color};
pub use cube::render_boxes_3d;
pub use rect::render_boxes_2d;

use image::RgbImage;
use tracing::warn;

use sdv_core::{CameraIntrinsics, DetectionRecord, ProjectionError, project_box};

/// What happened while annotating a batch of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Records actually drawn.
    pub drawn: usize,
    /// 3D boxes skipped because at least one corner was behind the camera.
    pub behind_camera: usize,
    /// 2D boxes skipped for having no area.
    pub skipped_empty: usize,
}

/// Draw all records onto a copy of the image, in input order.
///
/// 2D rectangles are drawn directly; 3D boxes are projected through the
/// given intrinsics first. Unrenderable records are counted in the report
/// instead of failing the batch.
pub fn annotate(
    image: &RgbImage,
    records: &[DetectionRecord],
    cam: &CameraIntrinsics,
) -> (RgbImage, RenderReport) {
    let mut canvas = image.clone();
    let mut report = RenderReport::default();

    for record in records {
        match record {
            DetectionRecord::Rect(bbox) => {
                if bbox.is_empty() {
                    report.skipped_empty += 1;
                } else {
                    rect::draw_box_2d(&mut canvas, bbox);
                    report.drawn += 1;
                }
            }
            DetectionRecord::Cuboid(bbox) => match project_box(bbox, cam) {
                Ok(projected) => {
                    cube::draw_wireframe(&mut canvas, &projected, &bbox.label);
                    report.drawn += 1;
                }
                Err(ProjectionError::BehindCamera) => {
                    warn!(label = %bbox.label, "box behind camera plane, skipping");
                    report.behind_camera += 1;
                }
            },
        }
    }

    (canvas, report)
}
