//! Synthetic raster generators.
//!
//! The patterns are predictable so tests can check that pixels survive
//! loading, overlaying and panel composition unchanged where they should.

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// An opaque grayscale ramp resembling a shaded elevation map.
///
/// Pixel value is `(x + y) % 256` on every channel.
///
/// ```
/// use test_utils::create_elevation_raster;
///
/// let img = create_elevation_raster(8, 4);
/// assert_eq!(img.dimensions(), (8, 4));
/// assert_eq!(img.get_pixel(3, 2).0, [5, 5, 5, 255]);
/// ```
pub fn create_elevation_raster(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let v = ((x + y) % 256) as u8;
        Rgba([v, v, v, 255])
    })
}

/// An opaque single-color raster.
pub fn create_solid_raster(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

/// An RGB raster with a rust-colored north/south gradient, the kind of
/// image a JPEG MOLA map decodes to.
pub fn create_mars_like_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |_, y| {
        let t = if height > 1 {
            y as f32 / (height - 1) as f32
        } else {
            0.0
        };
        Rgb([(180.0 + 60.0 * t) as u8, (90.0 + 40.0 * t) as u8, 60])
    })
}

/// Signed 16-bit elevation samples in row-major order.
///
/// Each sample is `row * 100 - col`, so both axes are recoverable.
pub fn create_elevation_samples(width: usize, height: usize) -> Vec<i16> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((row * 100) as i16 - col as i16);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_raster() {
        let img = create_solid_raster(3, 2, [10, 20, 30]);
        assert!(img.pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn test_mars_like_rgb_gradient() {
        let img = create_mars_like_rgb(4, 5);
        assert_eq!(img.get_pixel(0, 0).0, [180, 90, 60]);
        assert_eq!(img.get_pixel(0, 4).0, [240, 130, 60]);
    }

    #[test]
    fn test_elevation_samples() {
        let data = create_elevation_samples(6, 4);
        assert_eq!(data.len(), 24);
        assert_eq!(data[0], 0);
        assert_eq!(data[1], -1);
        assert_eq!(data[6], 100);
    }
}
