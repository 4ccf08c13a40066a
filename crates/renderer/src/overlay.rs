//! Translucent region color overlay.

use image::{Rgba, RgbaImage};
use mola_common::{GridConfig, RegionTable};
use region_mapper::{RegionClassifier, RegionMap};
use tracing::debug;

/// Alpha of the region fill.
pub const DEFAULT_OVERLAY_ALPHA: f32 = 0.3;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Overlay appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Opacity of the region colors, 0 to 1
    pub alpha: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_OVERLAY_ALPHA,
        }
    }
}

/// Color every classified pixel with its region color; background pixels
/// stay transparent.
pub fn region_mask(map: &RegionMap, table: &RegionTable, alpha: f32) -> RgbaImage {
    let palette: Vec<Rgba<u8>> = table.iter().map(|r| Rgba(r.color.rgba8(alpha))).collect();
    RgbaImage::from_fn(map.width(), map.height(), |x, y| {
        map.get(x, y)
            .and_then(|i| palette.get(i).copied())
            .unwrap_or(TRANSPARENT)
    })
}

/// Source-over blend of `src` onto `dst`.
pub(crate) fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = f32::from(src[3]) / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let s = f32::from(src[c]) * sa;
        let d = f32::from(dst[c]) * da * (1.0 - sa);
        dst[c] = ((s + d) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// Draw `overlay` over a copy of `base`. Both must have the same size.
pub fn composite(base: &RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    debug_assert_eq!(base.dimensions(), overlay.dimensions());
    let mut out = base.clone();
    for (dst, src) in out.pixels_mut().zip(overlay.pixels()) {
        blend_pixel(dst, *src);
    }
    out
}

/// Classifies an image and paints the region overlay onto it.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    config: GridConfig,
    style: OverlayStyle,
}

impl OverlayRenderer {
    pub fn new(config: GridConfig, style: OverlayStyle) -> Self {
        Self { config, style }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Classifier bound to the size of `base`.
    pub fn classifier_for(&self, base: &RgbaImage) -> RegionClassifier {
        RegionClassifier::new(base.width(), base.height(), &self.config)
    }

    /// Returns the overlaid image and the classification it was built from.
    pub fn render(&self, base: &RgbaImage) -> (RgbaImage, RegionMap) {
        let classifier = self.classifier_for(base);
        let map = RegionMap::build(&classifier);
        let mask = region_mask(&map, classifier.table(), self.style.alpha);
        debug!(
            width = base.width(),
            height = base.height(),
            alpha = self.style.alpha,
            "Painted region overlay"
        );
        (composite(base, &mask), map)
    }
}
