//! Raster input and output.

use std::io::ErrorKind;
use std::path::Path;

use image::{ImageError, ImageFormat, RgbaImage};
use mola_common::{MolaError, MolaResult};
use tracing::debug;

/// Load any supported raster (JPEG, PNG, ...) as RGBA.
///
/// A path that does not exist yields [`MolaError::ImageNotFound`]; every
/// other failure, including decoding errors, yields
/// [`MolaError::ImageProcessing`].
pub fn load_raster(path: &Path) -> MolaResult<RgbaImage> {
    if !path.exists() {
        return Err(MolaError::ImageNotFound(path.to_path_buf()));
    }

    let img = image::open(path).map_err(|e| match e {
        ImageError::IoError(ref io) if io.kind() == ErrorKind::NotFound => {
            MolaError::ImageNotFound(path.to_path_buf())
        }
        other => MolaError::ImageProcessing(format!("{}: {}", path.display(), other)),
    })?;

    if img.width() == 0 || img.height() == 0 {
        return Err(MolaError::ImageProcessing(format!(
            "{}: image has no pixels",
            path.display()
        )));
    }

    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Loaded raster"
    );
    Ok(img.to_rgba8())
}

/// Write an RGBA image as PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> MolaResult<()> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| MolaError::ImageProcessing(format!("cannot write {}: {}", path.display(), e)))
}
