//! Rename logo files after the company they depict.
//!
//! Identification itself sits behind the [`Classifier`] trait; this module owns
//! everything around it: validating and reading the image, deriving the MIME
//! type, sanitizing the returned name into a file stem, choosing the target
//! path, and resolving collisions.
//!
//! The module is a library surface for classifier implementers; the `logokit`
//! binary has no rename command. A service that answers with
//! [`CompanyResponse`] JSON plugs in through [`JsonClassifier`], which only
//! needs a transport returning the raw reply text. Results feed
//! [`crate::output::print_rename_reports`].
//!
//! ## Target Paths
//!
//! ```text
//! logokit-style input            classifier says     result
//! ---------------------------    ----------------    ------------------------------
//! shots/IMG_0042.png (file)      "Acme Corp."        shots/acme_corp_.png
//! shots/ (directory)             "Acme Corp."        shots/renamed/acme_corp_.png
//! shots/acme.png (file)          "ACME"              unchanged, already named
//! target taken                                       <stem>_YYYYMMDD_HHMMSS.<ext>
//! stamped target taken too                           RenameError::Collision
//! ```

use crate::imaging::{ImageBackend, ValidationError};
use crate::process::InputFile;
use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Subdirectory created inside a directory argument to receive renamed files.
pub const RENAMED_DIR: &str = "renamed";

/// Local-time suffix appended when the plain target name is taken.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Pause between consecutive classification requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(11);

#[derive(Error, Debug)]
#[error("{0}")]
pub struct ClassifierError(pub String);

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Target file '{0}' already exists.")]
    Collision(PathBuf),
    #[error("Classification failed: {0}")]
    Classifier(#[from] ClassifierError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Identifies the company behind a logo.
///
/// `Ok(None)` means the image was examined but no company was recognized.
pub trait Classifier {
    fn identify(&self, image: &[u8], mime_type: &str) -> Result<Option<String>, ClassifierError>;
}

/// JSON shape classifiers are asked to answer with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyResponse {
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Lowercase `raw`, replacing anything but ASCII letters, digits and `_` with `_`.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Parse a [`CompanyResponse`] and return its sanitized, non-empty name.
pub fn identifier_from_json(text: &str) -> Result<Option<String>, serde_json::Error> {
    let response: CompanyResponse = serde_json::from_str(text)?;
    Ok(response
        .company_name
        .map(|name| sanitize_identifier(&name))
        .filter(|id| !id.is_empty()))
}

/// [`Classifier`] over a transport that replies with [`CompanyResponse`] JSON.
///
/// The transport receives the image bytes and MIME type and returns the reply
/// body; parsing and sanitizing happen here.
pub struct JsonClassifier<F> {
    transport: F,
}

impl<F> JsonClassifier<F>
where
    F: Fn(&[u8], &str) -> Result<String, ClassifierError>,
{
    pub fn new(transport: F) -> Self {
        Self { transport }
    }
}

impl<F> Classifier for JsonClassifier<F>
where
    F: Fn(&[u8], &str) -> Result<String, ClassifierError>,
{
    fn identify(&self, image: &[u8], mime_type: &str) -> Result<Option<String>, ClassifierError> {
        let reply = (self.transport)(image, mime_type)?;
        identifier_from_json(&reply)
            .map_err(|e| ClassifierError(format!("malformed company response: {e}")))
    }
}

/// `image/<ext>` for the file's extension, with `jpg` spelled `jpeg`.
pub fn mime_type(path: &Path) -> String {
    match path.extension().map(|e| e.to_string_lossy().to_lowercase()) {
        Some(ext) if ext == "jpg" => "image/jpeg".to_string(),
        Some(ext) => format!("image/{ext}"),
        None => "application/octet-stream".to_string(),
    }
}

/// `<dir>/<identifier>.<ext>`, where `dir` is `target_dir` or the file's parent.
pub fn determine_new_path(path: &Path, identifier: &str, target_dir: Option<&Path>) -> PathBuf {
    let dir = target_dir
        .or_else(|| path.parent())
        .unwrap_or_else(|| Path::new(""));
    let name = match path.extension() {
        Some(ext) => format!("{identifier}.{}", ext.to_string_lossy()),
        None => identifier.to_string(),
    };
    dir.join(name)
}

pub fn timestamp_suffix<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Return `target` if free, else `target` stamped with `timestamp`.
pub fn resolve_collision(target: &Path, timestamp: &str) -> Result<PathBuf, RenameError> {
    if !target.exists() {
        return Ok(target.to_path_buf());
    }
    let stem = target.file_stem().unwrap_or_default().to_string_lossy();
    let name = match target.extension() {
        Some(ext) => format!("{stem}_{timestamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{timestamp}"),
    };
    let stamped = target.with_file_name(name);
    if stamped.exists() {
        return Err(RenameError::Collision(stamped));
    }
    log::debug!("{} exists, using {}", target.display(), stamped.display());
    Ok(stamped)
}

#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Report proposed names without moving anything.
    pub dry_run: bool,
    pub delay: Duration,
    /// Handle at most this many files.
    pub max_images: Option<usize>,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            delay: DEFAULT_REQUEST_DELAY,
            max_images: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { to: PathBuf },
    /// Dry run: where the file would go.
    Proposed { to: PathBuf },
    AlreadyNamed,
    Unidentified,
}

/// Result for one file of a rename batch.
#[derive(Debug)]
pub struct RenameReport {
    pub path: PathBuf,
    pub result: Result<RenameOutcome, RenameError>,
}

/// Classify one file and move it to its company-named path.
pub fn rename_image(
    backend: &impl ImageBackend,
    classifier: &impl Classifier,
    file: &InputFile,
    dry_run: bool,
    timestamp: &str,
) -> Result<RenameOutcome, RenameError> {
    let path = &file.path;
    let bytes = backend.read_validated(path)?;
    let mime = mime_type(path);

    let identifier = classifier
        .identify(&bytes, &mime)?
        .map(|raw| sanitize_identifier(&raw))
        .filter(|id| !id.is_empty());
    let Some(identifier) = identifier else {
        return Ok(RenameOutcome::Unidentified);
    };

    let target_dir = file.source_dir.as_ref().map(|dir| dir.join(RENAMED_DIR));
    let target = determine_new_path(path, &identifier, target_dir.as_deref());
    if target == *path {
        return Ok(RenameOutcome::AlreadyNamed);
    }
    let target = resolve_collision(&target, timestamp)?;

    if dry_run {
        return Ok(RenameOutcome::Proposed { to: target });
    }
    if let Some(dir) = &target_dir {
        fs::create_dir_all(dir)?;
    }
    fs::rename(path, &target)?;
    log::debug!("renamed {} -> {}", path.display(), target.display());
    Ok(RenameOutcome::Renamed { to: target })
}

/// Rename every file, pausing `options.delay` between classifier calls.
pub fn rename_batch(
    backend: &impl ImageBackend,
    classifier: &impl Classifier,
    files: &[InputFile],
    options: &RenameOptions,
) -> Vec<RenameReport> {
    let limit = options.max_images.unwrap_or(files.len());
    let mut reports = Vec::new();

    for (i, file) in files.iter().take(limit).enumerate() {
        if i > 0 && !options.delay.is_zero() {
            std::thread::sleep(options.delay);
        }
        let timestamp = timestamp_suffix(&Local::now());
        let result = rename_image(backend, classifier, file, options.dry_run, &timestamp);
        if let Err(e) = &result {
            log::warn!("could not rename {}: {e}", file.path.display());
        }
        reports.push(RenameReport {
            path: file.path.clone(),
            result,
        });
    }

    reports
}
