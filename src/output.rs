//! PNG output and file path resolution

use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Scaled dimensions do not fit
    #[error("scaling {width}x{height} by {factor} is too large")]
    ScaleTooLarge { width: u32, height: u32, factor: u8 },
}

/// Save an RGBA image as a PNG file.
///
/// The file is always PNG-encoded, whatever its extension. The image is
/// encoded before anything touches the filesystem; missing parent directories
/// are then created.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    let mut encoded = Vec::new();
    image.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, encoded)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// Each scene pixel becomes a `factor`×`factor` block. A factor of 0 or 1
/// returns the image unchanged. Scaled sizes that overflow the image buffer
/// are an error.
pub fn scale_image(image: RgbaImage, factor: u8) -> Result<RgbaImage, OutputError> {
    if factor <= 1 {
        return Ok(image);
    }
    let (w, h) = image.dimensions();
    let too_large = || OutputError::ScaleTooLarge {
        width: w,
        height: h,
        factor,
    };
    let new_w = w.checked_mul(u32::from(factor)).ok_or_else(too_large)?;
    let new_h = h.checked_mul(u32::from(factor)).ok_or_else(too_large)?;
    (new_w as usize)
        .checked_mul(new_h as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(too_large)?;

    Ok(image::imageops::resize(&image, new_w, new_h, FilterType::Nearest))
}

/// Resolve where the rendered image is written.
///
/// An explicit output path wins; otherwise the filename from the `png` header
/// is used as given, so relative names land in the working directory.
pub fn resolve_output_path(header_filename: &str, output_arg: Option<&Path>) -> PathBuf {
    match output_arg {
        Some(output) => output.to_path_buf(),
        None => PathBuf::from(header_filename),
    }
}
