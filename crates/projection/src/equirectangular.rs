//! Equirectangular projection with a shifted longitude origin.
//!
//! Global MOLA maps are plate carrée rasters: rows are evenly spaced in
//! latitude from 90°N at the top to 90°S at the bottom, columns evenly
//! spaced in longitude. Many published maps do not start at 0°E on the left
//! edge; the origin is shifted right by a fraction of the image width (the
//! x offset ratio), so the left edge shows longitude `ratio × 360°`.

use mola_common::coords::{LAT_MAX, LON_PERIOD};
use mola_common::{GeoCoordinate, GridConfig};

/// Span of latitudes covered by the image height.
const LAT_SPAN: f64 = 180.0;

/// Column ratios this close to a full turn are treated as the left edge.
const WRAP_TOLERANCE: f64 = 1e-12;

/// Equirectangular projection parameters for one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetEquirectangular {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Fraction of the width by which the longitude origin is shifted right
    pub x_offset_ratio: f64,
}

impl OffsetEquirectangular {
    /// Create a projection for a `width` x `height` image.
    pub fn new(width: u32, height: u32, x_offset_ratio: f64) -> Self {
        debug_assert!(width > 0 && height > 0, "empty image {width}x{height}");
        debug_assert!(
            (0.0..1.0).contains(&x_offset_ratio),
            "offset ratio {x_offset_ratio} outside [0, 1)"
        );
        Self {
            width,
            height,
            x_offset_ratio,
        }
    }

    /// Create a projection using the offset of a grid configuration.
    pub fn from_config(width: u32, height: u32, config: &GridConfig) -> Self {
        Self::new(width, height, config.x_offset_ratio())
    }

    /// Convert an image position to geographic coordinates.
    ///
    /// Positions may be fractional (pixel corners are whole numbers).
    /// Longitudes are wrapped into `[0, 360)`.
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> GeoCoordinate {
        let lat = LAT_MAX - (y / f64::from(self.height)) * LAT_SPAN;
        let mut lon = ((x / f64::from(self.width)) + self.x_offset_ratio) * LON_PERIOD;
        if lon >= LON_PERIOD {
            lon -= LON_PERIOD;
        }
        GeoCoordinate { lat, lon }
    }

    /// Row position of a latitude. North is up.
    pub fn lat_to_y(&self, lat: f64) -> f64 {
        ((LAT_MAX - lat) / LAT_SPAN) * f64::from(self.height)
    }

    /// Column position of a longitude, honoring the origin shift.
    pub fn lon_to_x(&self, lon: f64) -> f64 {
        let mut x_ratio = (lon / LON_PERIOD) - self.x_offset_ratio;
        if x_ratio < 0.0 {
            // west of the shifted origin: wrap to the right part of the image
            x_ratio += 1.0;
        }
        if x_ratio >= 1.0 - WRAP_TOLERANCE {
            x_ratio = 0.0;
        }
        x_ratio * f64::from(self.width)
    }

    /// Convert geographic coordinates to an image position `(x, y)`.
    ///
    /// Inverse of [`pixel_to_geo`](Self::pixel_to_geo).
    pub fn geo_to_pixel(&self, geo: &GeoCoordinate) -> (f64, f64) {
        debug_assert!(geo.is_valid(), "coordinate {geo:?} outside the globe");
        (self.lon_to_x(geo.lon), self.lat_to_y(geo.lat))
    }

    /// Whether a (possibly fractional) position lies on the image,
    /// edges included.
    pub fn contains_position(&self, x: f64, y: f64) -> bool {
        (0.0..=f64::from(self.width)).contains(&x) && (0.0..=f64::from(self.height)).contains(&y)
    }
}

/// Convert pixel `(x, y)` of an `img_width` x `img_height` image to
/// geographic coordinates.
pub fn pixel_to_geo(
    x: u32,
    y: u32,
    img_width: u32,
    img_height: u32,
    x_offset_ratio: f64,
) -> GeoCoordinate {
    OffsetEquirectangular::new(img_width, img_height, x_offset_ratio)
        .pixel_to_geo(f64::from(x), f64::from(y))
}

/// Convert geographic coordinates to an image position `(x, y)`.
pub fn geo_to_pixel(
    lat: f64,
    lon: f64,
    img_width: u32,
    img_height: u32,
    x_offset_ratio: f64,
) -> (f64, f64) {
    OffsetEquirectangular::new(img_width, img_height, x_offset_ratio)
        .geo_to_pixel(&GeoCoordinate { lat, lon })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_with_quarter_offset() {
        let geo = pixel_to_geo(0, 0, 360, 180, 0.25);
        assert_eq!(geo.lat, 90.0);
        assert_eq!(geo.lon, 90.0);
    }

    #[test]
    fn test_no_offset_is_identity_in_degrees() {
        let geo = pixel_to_geo(123, 45, 360, 180, 0.0);
        assert_eq!(geo.lat, 45.0);
        assert_eq!(geo.lon, 123.0);
    }

    #[test]
    fn test_longitude_wraps() {
        // 300/360 + 0.25 = 1.0833 turns -> 30°E
        let geo = pixel_to_geo(300, 90, 360, 180, 0.25);
        assert!((geo.lon - 30.0).abs() < 1e-9);
        assert_eq!(geo.lat, 0.0);
        // exactly one full turn becomes 0°E
        assert_eq!(pixel_to_geo(270, 0, 360, 180, 0.25).lon, 0.0);
    }

    #[test]
    fn test_geo_to_pixel_wraps_west_of_origin() {
        // 0°E lies three quarters across an image shifted by a quarter
        let (x, y) = geo_to_pixel(0.0, 0.0, 360, 180, 0.25);
        assert!((x - 270.0).abs() < 1e-9);
        assert_eq!(y, 90.0);
        let (x, _) = geo_to_pixel(0.0, 90.0, 360, 180, 0.25);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_contains_position_includes_edges() {
        let proj = OffsetEquirectangular::new(100, 50, 0.0);
        assert!(proj.contains_position(0.0, 0.0));
        assert!(proj.contains_position(100.0, 50.0));
        assert!(!proj.contains_position(100.5, 10.0));
        assert!(!proj.contains_position(10.0, -0.5));
    }

    #[test]
    fn test_from_config() {
        let proj = OffsetEquirectangular::from_config(720, 360, &GridConfig::default());
        assert_eq!(proj.x_offset_ratio, 0.25);
        assert_eq!(proj.width, 720);
    }
}
