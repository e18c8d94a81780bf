//! 3D wireframe renderer

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use sdv_core::ProjectedBox;

use crate::color::color_for_label;
use crate::rect::draw_label_tag;

/// Dash pattern period in pixels for occluded edges.
const DASH_LENGTH: f64 = 5.0;

/// Vertical offset of the label tag above projected corner 0.
const LABEL_OFFSET: i32 = 10;

/// Draw projected box wireframes onto a copy of the image. The input
/// raster is never mutated.
pub fn render_boxes_3d(image: &RgbImage, boxes: &[(ProjectedBox, String)]) -> RgbImage {
    let mut canvas = image.clone();
    for (projected, label) in boxes {
        draw_wireframe(&mut canvas, projected, label);
    }
    canvas
}

pub(crate) fn draw_wireframe(canvas: &mut RgbImage, projected: &ProjectedBox, label: &str) {
    let color = color_for_label(label);

    // Best-effort hidden-line treatment: the three edges meeting at the
    // deepest corner are usually occluded by the box itself.
    let deepest = projected.deepest_corner();

    for &(i, j) in projected.edges() {
        let p = projected.corners[i];
        let q = projected.corners[j];
        if i == deepest || j == deepest {
            draw_dashed_line(canvas, p, q, color);
        } else {
            draw_line_segment_mut(
                canvas,
                (p.0 as f32, p.1 as f32),
                (q.0 as f32, q.1 as f32),
                color,
            );
        }
    }

    let (ax, ay) = projected.corners[0];
    draw_label_tag(canvas, ax.round() as i32, ay.round() as i32 - LABEL_OFFSET, label);
}

fn draw_dashed_line(canvas: &mut RgbImage, p: (f64, f64), q: (f64, f64), color: Rgb<u8>) {
    let (dx, dy) = (q.0 - p.0, q.1 - p.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length < 1.0 {
        return;
    }

    let steps = length.ceil() as usize;
    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        // Alternate on/off runs of DASH_LENGTH pixels
        if ((t * length / DASH_LENGTH) as usize) % 2 == 0 {
            let x = (p.0 + t * dx).round() as i64;
            let y = (p.1 + t * dy).round() as i64;
            if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
