//! 2D rectangle renderer

use image::RgbImage;
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use sdv_core::Box2D;

use crate::color::{color_for_label, contrast_color};
use crate::text::{TEXT_HEIGHT, draw_text, text_width};

const OUTLINE_THICKNESS: i32 = 2;
const TAG_PADDING: i32 = 2;

/// Draw labeled rectangles onto a copy of the image. The input raster is
/// never mutated. Zero-area boxes are skipped; coordinates are clamped to
/// the canvas.
pub fn render_boxes_2d(image: &RgbImage, boxes: &[Box2D]) -> RgbImage {
    let mut canvas = image.clone();
    for bbox in boxes {
        draw_box_2d(&mut canvas, bbox);
    }
    canvas
}

pub(crate) fn draw_box_2d(canvas: &mut RgbImage, bbox: &Box2D) {
    if bbox.is_empty() {
        return;
    }

    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let x1 = bbox.x1.clamp(0.0, (w - 1) as f64).round() as i32;
    let y1 = bbox.y1.clamp(0.0, (h - 1) as f64).round() as i32;
    let x2 = bbox.x2.clamp(0.0, (w - 1) as f64).round() as i32;
    let y2 = bbox.y2.clamp(0.0, (h - 1) as f64).round() as i32;

    // Entirely off-canvas boxes collapse to a zero-area strip when clamped.
    if x2 <= x1 || y2 <= y1 {
        return;
    }

    let color = color_for_label(&bbox.label);

    for t in 0..OUTLINE_THICKNESS {
        // Inclusive of both corner pixels
        let width = x2 - x1 + 1 - 2 * t;
        let height = y2 - y1 + 1 - 2 * t;
        if width <= 0 || height <= 0 {
            break;
        }
        draw_hollow_rect_mut(
            canvas,
            Rect::at(x1 + t, y1 + t).of_size(width as u32, height as u32),
            color,
        );
    }

    draw_label_tag(canvas, x1, y1, &bbox.label);
}

/// Filled tag with contrasting text, above the anchor when there is room,
/// below it otherwise.
pub(crate) fn draw_label_tag(canvas: &mut RgbImage, x: i32, y: i32, label: &str) {
    let color = color_for_label(label);
    let tag_w = text_width(label) + 2 * TAG_PADDING as u32;
    let tag_h = TEXT_HEIGHT + 2 * TAG_PADDING as u32;

    let ty = if y - tag_h as i32 >= 0 {
        y - tag_h as i32
    } else {
        y
    };

    draw_filled_rect_mut(canvas, Rect::at(x, ty).of_size(tag_w, tag_h), color);
    draw_text(
        canvas,
        x + TAG_PADDING,
        ty + TAG_PADDING,
        label,
        contrast_color(color),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn blank(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([17, 17, 17]))
    }

    #[test]
    fn test_does_not_mutate_input() {
        let canvas = blank(100, 100);
        let boxes = vec![Box2D::new(10.0, 30.0, 60.0, 80.0, "cat")];
        let _ = render_boxes_2d(&canvas, &boxes);
        assert!(canvas.pixels().all(|p| p.0 == [17, 17, 17]));
    }

    #[test]
    fn test_zero_area_box_is_noop() {
        let canvas = blank(100, 100);
        let boxes = vec![Box2D::new(10.0, 10.0, 10.0, 50.0, "cat")];
        let out = render_boxes_2d(&canvas, &boxes);
        assert_eq!(out.as_raw(), canvas.as_raw());
    }

    #[test]
    fn test_box_outline_drawn_in_label_color() {
        let canvas = blank(100, 100);
        let boxes = vec![Box2D::new(10.0, 30.0, 60.0, 80.0, "cat")];
        let out = render_boxes_2d(&canvas, &boxes);

        let color = color_for_label("cat");
        assert_eq!(*out.get_pixel(10, 40), color);
        assert_eq!(*out.get_pixel(60, 40), color);
        assert_eq!(*out.get_pixel(35, 30), color);
        // 2px thick: one pixel inside the edge is painted too
        assert_eq!(*out.get_pixel(11, 40), color);
        // Interior untouched
        assert_eq!(out.get_pixel(35, 55).0, [17, 17, 17]);
    }

    #[test]
    fn test_out_of_canvas_coordinates_are_clamped() {
        let canvas = blank(100, 100);
        let boxes = vec![Box2D::new(-50.0, -50.0, 150.0, 150.0, "cat")];
        let out = render_boxes_2d(&canvas, &boxes);

        let color = color_for_label("cat");
        assert_eq!(*out.get_pixel(0, 50), color);
        assert_eq!(*out.get_pixel(99, 50), color);
    }

    #[test]
    fn test_entirely_off_canvas_box_is_noop_outline() {
        let canvas = blank(100, 100);
        let boxes = vec![Box2D::new(200.0, 200.0, 300.0, 300.0, "cat")];
        // Must not panic; the clamped box has no area.
        let _ = render_boxes_2d(&canvas, &boxes);
    }

    #[test]
    fn test_empty_canvas_does_not_panic() {
        let boxes = vec![Box2D::new(10.0, 30.0, 60.0, 80.0, "cat")];
        for (w, h) in [(0, 0), (0, 100), (100, 0)] {
            let canvas = RgbImage::new(w, h);
            let out = render_boxes_2d(&canvas, &boxes);
            assert_eq!(out.dimensions(), (w, h));
        }
    }

    #[test]
    fn test_overlapping_boxes_draw_in_input_order() {
        let canvas = blank(100, 100);
        let boxes = vec![
            Box2D::new(20.0, 40.0, 80.0, 90.0, "first"),
            Box2D::new(20.0, 40.0, 80.0, 90.0, "second"),
        ];
        let out = render_boxes_2d(&canvas, &boxes);
        // The later box overdraws the shared outline.
        assert_eq!(*out.get_pixel(20, 60), color_for_label("second"));
    }

    #[test]
    fn test_label_tag_above_box() {
        let canvas = blank(100, 100);
        let boxes = vec![Box2D::new(10.0, 30.0, 60.0, 80.0, "cat")];
        let out = render_boxes_2d(&canvas, &boxes);

        // Tag sits directly above the top-left corner; the padding pixel at
        // (11, 17) is fill only, no glyph reaches it.
        let fill = color_for_label("cat");
        assert_eq!(*out.get_pixel(11, 17), fill);

        // The text itself shows up inside the tag in the contrast color.
        let text = contrast_color(fill);
        let lit = (10..=37)
            .flat_map(|x| (16..=29).map(move |y| (x, y)))
            .filter(|&(x, y)| *out.get_pixel(x, y) == text)
            .count();
        assert!(lit > 0);
    }
}
