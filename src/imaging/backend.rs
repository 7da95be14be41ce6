//! Image I/O backend trait and shared error types.
//!
//! The [`ImageBackend`] trait defines the three operations the batch driver and
//! the rename workflow need from storage: read the raw bytes of a validated
//! image, decode it, and save a result.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use an in-memory mock so batch logic can be exercised without
//! touching encoders.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Problems with an input image: it is missing, unreadable, undecodable, or
/// its pixels do not satisfy a transform's preconditions.
///
/// Recovered at the batch level: the offending file is skipped.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("File '{0}' does not exist.")]
    NotFound(PathBuf),
    #[error("Could not read file '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid image file '{path}': {reason}")]
    InvalidImage { path: PathBuf, reason: String },
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("Inconsistent background color: fewer than 3 corners match (best match: {matching} of 4).")]
    InconsistentBackground { matching: usize },
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to save {path}: {reason}")]
    SaveFailed { path: PathBuf, reason: String },
}

/// Storage operations for image files.
pub trait ImageBackend {
    /// Check that the file exists and decodes as an image, then return its bytes.
    fn read_validated(&self, path: &Path) -> Result<Vec<u8>, ValidationError>;

    /// Decode an image, keeping its native color layout.
    fn load(&self, path: &Path) -> Result<DynamicImage, ValidationError>;

    /// Encode `image` to `path`, choosing the format from the extension.
    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError>;
}
