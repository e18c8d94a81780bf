//! Deterministic per-label colors

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use image::Rgb;

/// Fixed palette; boxes for the same label always get the same entry.
pub const PALETTE: [Rgb<u8>; 24] = [
    Rgb([255, 0, 0]),
    Rgb([0, 255, 0]),
    Rgb([0, 0, 255]),
    Rgb([255, 255, 0]),
    Rgb([255, 0, 255]),
    Rgb([0, 255, 255]),
    Rgb([255, 165, 0]),
    Rgb([128, 0, 128]),
    Rgb([0, 128, 0]),
    Rgb([255, 192, 203]),
    Rgb([255, 215, 0]),
    Rgb([75, 0, 130]),
    Rgb([0, 255, 127]),
    Rgb([220, 20, 60]),
    Rgb([138, 43, 226]),
    Rgb([124, 252, 0]),
    Rgb([255, 69, 0]),
    Rgb([218, 112, 214]),
    Rgb([32, 178, 170]),
    Rgb([255, 105, 180]),
    Rgb([50, 205, 50]),
    Rgb([186, 85, 211]),
    Rgb([147, 112, 219]),
    Rgb([60, 179, 113]),
];

/// Map a label to a palette color by stable hash. Pure: the same label
/// yields the same color in every call and every run.
pub fn color_for_label(label: &str) -> Rgb<u8> {
    let mut hasher = DefaultHasher::new();
    label.hash(&mut hasher);
    PALETTE[(hasher.finish() % PALETTE.len() as u64) as usize]
}

/// Black or white, whichever reads better on the given background.
pub fn contrast_color(background: Rgb<u8>) -> Rgb<u8> {
    let Rgb([r, g, b]) = background;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luminance > 140.0 {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}
