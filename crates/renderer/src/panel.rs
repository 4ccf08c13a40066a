//! Panel composition.

use image::{imageops, Rgba, RgbaImage};

/// Space between panels in pixels.
pub const PANEL_GAP: u32 = 16;

const PANEL_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Place `left` and `right` next to each other on a white canvas,
/// top-aligned, `PANEL_GAP` pixels apart.
pub fn compose_side_by_side(left: &RgbaImage, right: &RgbaImage) -> RgbaImage {
    let width = left.width() + PANEL_GAP + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbaImage::from_pixel(width, height, PANEL_BACKGROUND);
    imageops::replace(&mut canvas, left, 0, 0);
    imageops::replace(
        &mut canvas,
        right,
        i64::from(left.width() + PANEL_GAP),
        0,
    );
    canvas
}
