//! `image`-crate backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Validate | `ImageReader::with_guessed_format` + `decode` |
//! | Decode (JPEG, PNG, WebP, BMP, GIF) | `image` crate decoders |
//! | Encode | `DynamicImage::save`, format from extension |
//!
//! Palette-indexed PNG and GIF inputs are expanded to RGB/RGBA by the
//! decoders, so everything downstream sees a direct color layout.

use super::backend::{BackendError, ImageBackend, ValidationError};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions accepted by default, paired with the format that decodes them.
const LOGO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("webp", ImageFormat::WebP),
    ("bmp", ImageFormat::Bmp),
    ("gif", ImageFormat::Gif),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    LOGO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Backend that decodes and encodes through the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ValidationError> {
    if !path.exists() {
        return Err(ValidationError::NotFound(path.to_path_buf()));
    }
    std::fs::read(path).map_err(|source| ValidationError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode from bytes, sniffing the format from content rather than extension.
fn decode(path: &Path, bytes: &[u8]) -> Result<DynamicImage, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidImage {
        path: path.to_path_buf(),
        reason,
    };
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| invalid(e.to_string()))?
        .decode()
        .map_err(|e| invalid(e.to_string()))
}

impl ImageBackend for RustBackend {
    fn read_validated(&self, path: &Path) -> Result<Vec<u8>, ValidationError> {
        let bytes = read_bytes(path)?;
        decode(path, &bytes)?;
        Ok(bytes)
    }

    fn load(&self, path: &Path) -> Result<DynamicImage, ValidationError> {
        let bytes = read_bytes(path)?;
        decode(path, &bytes)
    }

    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError> {
        image.save(path).map_err(|e| match e {
            image::ImageError::IoError(io) => BackendError::Io(io),
            other => BackendError::SaveFailed {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })
    }
}
