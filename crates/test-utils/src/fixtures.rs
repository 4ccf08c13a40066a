//! File fixtures written into temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::generators::{create_elevation_raster, create_elevation_samples, create_mars_like_rgb};

/// Standard MEGDR-like image sizes.
pub mod sizes {
    /// One pixel per degree, the easiest size to reason about.
    pub const ONE_PER_DEGREE: (u32, u32) = (360, 180);

    /// Small 2:1 map.
    pub const SMALL: (u32, u32) = (72, 36);

    /// Odd dimensions where band edges fall between pixels.
    pub const ODD: (u32, u32) = (97, 61);
}

/// Writes a PNG elevation ramp and returns its path.
pub fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    create_elevation_raster(width, height)
        .save(&path)
        .expect("Failed to write test PNG");
    path
}

/// Writes an RGB JPEG and returns its path.
pub fn write_test_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    create_mars_like_rgb(width, height)
        .save(&path)
        .expect("Failed to write test JPEG");
    path
}

/// Writes bytes that no image decoder accepts, under an image extension.
pub fn write_corrupt_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not a real png body")
        .expect("Failed to write corrupt image");
    path
}

/// Text of a minimal PDS label for a 16-bit tile.
pub fn pds_label_text(lines: usize, samples: usize, sample_type: &str) -> String {
    format!(
        "PDS_VERSION_ID = PDS3\n\
         RECORD_TYPE = FIXED_LENGTH\n\
         OBJECT = IMAGE\n\
         \x20 LINES = {lines}\n\
         \x20 LINE_SAMPLES = {samples}\n\
         \x20 SAMPLE_TYPE = {sample_type}\n\
         \x20 SAMPLE_BITS = 16\n\
         \x20 UNIT = \"METER\"\n\
         END_OBJECT = IMAGE\n\
         END\n"
    )
}

/// Writes a `.LBL`/`.IMG` pair filled with `create_elevation_samples`
/// and returns `(label_path, img_path)`.
pub fn write_test_tile(
    dir: &Path,
    stem: &str,
    lines: usize,
    samples: usize,
    big_endian: bool,
) -> (PathBuf, PathBuf) {
    let sample_type = if big_endian { "MSB_INTEGER" } else { "LSB_INTEGER" };
    let label_path = dir.join(format!("{stem}.LBL"));
    fs::write(&label_path, pds_label_text(lines, samples, sample_type))
        .expect("Failed to write test label");

    let bytes: Vec<u8> = create_elevation_samples(samples, lines)
        .into_iter()
        .flat_map(|v| {
            if big_endian {
                v.to_be_bytes()
            } else {
                v.to_le_bytes()
            }
        })
        .collect();
    let img_path = dir.join(format!("{stem}.IMG"));
    fs::write(&img_path, bytes).expect("Failed to write test tile");
    (label_path, img_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temp_test_dir;

    #[test]
    fn test_write_png_round_trips() {
        let dir = temp_test_dir();
        let path = write_test_png(dir.path(), "ramp.png", 10, 5);
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (10, 5));
        assert_eq!(img.get_pixel(4, 3).0, [7, 7, 7, 255]);
    }

    #[test]
    fn test_write_tile_sizes() {
        let dir = temp_test_dir();
        let (label, img) = write_test_tile(dir.path(), "MEGT88n000HB", 4, 6, true);
        assert!(fs::read_to_string(label).unwrap().contains("LINE_SAMPLES = 6"));
        assert_eq!(fs::metadata(img).unwrap().len(), 48);
    }

    #[test]
    fn test_corrupt_image_fails_to_decode() {
        let dir = temp_test_dir();
        let path = write_corrupt_image(dir.path(), "broken.png");
        assert!(image::open(path).is_err());
    }
}
