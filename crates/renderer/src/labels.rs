//! Region labels drawn at tile centers.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use mola_common::{MolaError, MolaResult, RegionTable};
use projection::OffsetEquirectangular;
use rusttype::{Font, Scale};

use crate::overlay::blend_pixel;

/// Embedded font used when no other is supplied
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// A label anchored at the projected center of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub region_index: usize,
    /// Anchor column (label center)
    pub x: f64,
    /// Anchor row (label center)
    pub y: f64,
    /// Latitude line, then longitude line
    pub lines: [String; 2],
}

/// Label appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub font_size: f32,
    /// Opacity of the black box behind the text
    pub box_alpha: f32,
    pub padding: i32,
    pub text_color: Rgba<u8>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            box_alpha: 0.8,
            padding: 3,
            text_color: Rgba([255, 255, 255, 255]),
        }
    }
}

impl LabelStyle {
    /// Scale the font with the image so labels stay legible on large maps.
    pub fn for_image_height(height: u32) -> Self {
        Self {
            font_size: (height as f32 / 60.0).clamp(8.0, 48.0),
            ..Self::default()
        }
    }
}

/// Anchors for every region whose projected center lands on the image.
pub fn label_placements(
    projection: &OffsetEquirectangular,
    table: &RegionTable,
) -> Vec<LabelPlacement> {
    table
        .iter()
        .filter_map(|region| {
            let (x, y) = projection.geo_to_pixel(&region.center());
            projection.contains_position(x, y).then(|| LabelPlacement {
                region_index: region.index,
                x,
                y,
                lines: [
                    region.lat_label().to_string(),
                    region.lon_label().to_string(),
                ],
            })
        })
        .collect()
}

/// The bundled DejaVu Sans Mono.
pub fn default_font() -> MolaResult<Font<'static>> {
    Font::try_from_bytes(FONT_DATA)
        .ok_or_else(|| MolaError::InvalidConfig("bundled label font is unreadable".into()))
}

/// Read a TrueType font for label text.
pub fn load_font(path: &Path) -> MolaResult<Font<'static>> {
    let data = std::fs::read(path).map_err(|e| {
        MolaError::InvalidConfig(format!("cannot read font {}: {}", path.display(), e))
    })?;
    Font::try_from_vec(data)
        .ok_or_else(|| MolaError::InvalidConfig(format!("{} is not a TrueType font", path.display())))
}

/// Box around a label as `(left, top, width, height)`.
///
/// Text size is estimated from the character count, so boxes are laid out
/// the same with or without a font.
pub fn label_box(placement: &LabelPlacement, style: &LabelStyle) -> (i32, i32, i32, i32) {
    let char_width = style.font_size * 0.6;
    let longest = placement
        .lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let text_width = (longest as f32 * char_width).ceil() as i32;
    let text_height = (style.font_size * placement.lines.len() as f32).ceil() as i32;
    let width = text_width + 2 * style.padding;
    let height = text_height + 2 * style.padding;
    let left = placement.x.round() as i32 - width / 2;
    let top = placement.y.round() as i32 - height / 2;
    (left, top, width, height)
}

fn fill_box(img: &mut RgbaImage, (left, top, width, height): (i32, i32, i32, i32), color: Rgba<u8>) {
    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = (left + width).min(img.width() as i32);
    let y1 = (top + height).min(img.height() as i32);
    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel(img.get_pixel_mut(x as u32, y as u32), color);
        }
    }
}

/// Draw label boxes, and their text when a font is available.
pub fn draw_labels(
    img: &mut RgbaImage,
    placements: &[LabelPlacement],
    font: Option<&Font<'_>>,
    style: &LabelStyle,
) {
    let box_color = Rgba([0, 0, 0, (style.box_alpha.clamp(0.0, 1.0) * 255.0).round() as u8]);
    let scale = Scale::uniform(style.font_size);

    for placement in placements {
        let bounds = label_box(placement, style);
        fill_box(img, bounds, box_color);

        let Some(font) = font else { continue };
        let (left, top, _, _) = bounds;
        for (i, line) in placement.lines.iter().enumerate() {
            let line_y = top + style.padding + (i as f32 * style.font_size) as i32;
            draw_text_mut(img, style.text_color, left + style.padding, line_y, scale, font, line);
        }
    }
}
