//! Minimal built-in 3x5 bitmap font for label tags
//!
//! Keeps the renderer free of font-file assets. Lowercase maps to
//! uppercase; characters outside the glyph set render as a hollow box.

use image::{Rgb, RgbImage};

const GLYPH_SCALE: i32 = 2;
const GLYPH_ADVANCE: i32 = 4; // 3 columns + 1 space, pre-scale

/// Rendered text height in pixels.
pub const TEXT_HEIGHT: u32 = 5 * GLYPH_SCALE as u32;

/// Rendered width of a string in pixels.
pub fn text_width(text: &str) -> u32 {
    (text.chars().count() as i32 * GLYPH_ADVANCE * GLYPH_SCALE) as u32
}

fn glyph(ch: char) -> [u8; 5] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b010, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b110, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        ' ' => [0b000; 5],
        _ => [0b111, 0b101, 0b101, 0b101, 0b111],
    }
}

fn draw_glyph(img: &mut RgbImage, x: i32, y: i32, ch: char, color: Rgb<u8>) {
    for (row, bits) in glyph(ch).iter().enumerate() {
        for col in 0..3 {
            if (bits >> (2 - col)) & 1 == 1 {
                for dy in 0..GLYPH_SCALE {
                    for dx in 0..GLYPH_SCALE {
                        let px = x + col * GLYPH_SCALE + dx;
                        let py = y + row as i32 * GLYPH_SCALE + dy;
                        if px >= 0
                            && py >= 0
                            && (px as u32) < img.width()
                            && (py as u32) < img.height()
                        {
                            img.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
    }
}

/// Draw a text run with its top-left corner at (x, y). Pixels falling
/// outside the canvas are dropped.
pub fn draw_text(img: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let mut cursor_x = x;
    for ch in text.chars() {
        draw_glyph(img, cursor_x, y, ch, color);
        cursor_x += GLYPH_ADVANCE * GLYPH_SCALE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_changes_pixels() {
        let mut img = RgbImage::from_pixel(100, 20, Rgb([0, 0, 0]));
        draw_text(&mut img, 2, 2, "CAT", Rgb([255, 255, 255]));

        let lit = img.pixels().filter(|p| p.0 == [255, 255, 255]).count();
        assert!(lit > 0);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        let mut upper = RgbImage::from_pixel(100, 20, Rgb([0, 0, 0]));
        let mut lower = RgbImage::from_pixel(100, 20, Rgb([0, 0, 0]));
        draw_text(&mut upper, 2, 2, "CAT", Rgb([255, 255, 255]));
        draw_text(&mut lower, 2, 2, "cat", Rgb([255, 255, 255]));
        assert_eq!(upper.as_raw(), lower.as_raw());
    }

    #[test]
    fn test_off_canvas_text_does_not_panic() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        draw_text(&mut img, -50, -50, "far away", Rgb([255, 255, 255]));
        draw_text(&mut img, 500, 500, "far away", Rgb([255, 255, 255]));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("cat"), 24);
        assert_eq!(text_width(""), 0);
    }
}
