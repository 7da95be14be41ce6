//! Batch driver: expand inputs, run an operation chain per file, save results.
//!
//! Every command (`trim`, `extend`, `manipulate`) is a [`Job`]: an
//! [`OperationChain`] plus where results go. Files are handled one at a time;
//! a file that fails validation or saving is recorded as skipped and the batch
//! moves on.
//!
//! ## Input Expansion
//!
//! ```text
//! logokit trim logo.png brand/
//!   logo.png          # explicit file: attempted as-is
//!   brand/            # directory: its image files, sorted, not recursive
//!     a.PNG           # extension match is case-insensitive
//!     b.jpg
//!     notes.txt       # ignored
//!     old/            # ignored
//! ```
//!
//! ## Output Naming
//!
//! ```text
//! logo.png  --trim-->        logo_trimmed.png
//! logo.png  --extend-->      logo_extended.png
//! logo.png  --manipulate-->  logo_processed.png
//! logo.png  --any -r-->      logo.png (replaced)
//! ```
//!
//! Nothing is written for a file whose chain reports no modification.

use crate::imaging::{
    self, BackendError, ImageBackend, Operation, OperationChain, ValidationError,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

pub const TRIM_SUFFIX: &str = "_trimmed";
pub const EXTEND_SUFFIX: &str = "_extended";
pub const MANIPULATE_SUFFIX: &str = "_processed";

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Image save failed: {0}")]
    Backend(#[from] BackendError),
}

/// A file selected for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// The directory argument this file was found in, if any.
    pub source_dir: Option<PathBuf>,
}

/// Result of expanding command-line paths.
#[derive(Debug, Default)]
pub struct CollectedInputs {
    pub files: Vec<InputFile>,
    /// Paths that do not exist.
    pub missing: Vec<PathBuf>,
    /// Directories with no matching image files.
    pub empty_dirs: Vec<PathBuf>,
}

/// Case-insensitive extension match against `extensions` (no dots).
pub fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

/// Expand `paths` into image files.
///
/// Explicit files are kept regardless of extension; directories contribute
/// their direct children whose extension is in `extensions`, in file-name
/// order.
pub fn collect_files(paths: &[PathBuf], extensions: &[String]) -> CollectedInputs {
    let mut collected = CollectedInputs::default();

    for path in paths {
        if path.is_dir() {
            let found: Vec<InputFile> = WalkDir::new(path)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::warn!("skipping unreadable entry in {}: {e}", path.display());
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|p| has_image_extension(p, extensions))
                .map(|p| InputFile {
                    path: p,
                    source_dir: Some(path.clone()),
                })
                .collect();
            log::debug!("{}: {} image file(s)", path.display(), found.len());
            if found.is_empty() {
                collected.empty_dirs.push(path.clone());
            }
            collected.files.extend(found);
        } else if path.exists() {
            collected.files.push(InputFile {
                path: path.clone(),
                source_dir: None,
            });
        } else {
            collected.missing.push(path.clone());
        }
    }

    collected
}

/// Where a processed image is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Overwrite the input file.
    Replace,
    /// Write `<stem><suffix>.<ext>` next to the input.
    Suffix(String),
}

impl OutputMode {
    pub fn output_path(&self, input: &Path) -> PathBuf {
        match self {
            OutputMode::Replace => input.to_path_buf(),
            OutputMode::Suffix(suffix) => {
                let stem = input.file_stem().unwrap_or_default().to_string_lossy();
                let name = match input.extension() {
                    Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
                    None => format!("{stem}{suffix}"),
                };
                input.with_file_name(name)
            }
        }
    }
}

/// One command invocation: the chain to run and where results go.
#[derive(Debug, Clone)]
pub struct Job {
    pub chain: OperationChain,
    pub output: OutputMode,
    /// Report a result identical to its input as unmodified.
    pub skip_same: bool,
}

impl Job {
    fn mode(replace: bool, suffix: &str) -> OutputMode {
        if replace {
            OutputMode::Replace
        } else {
            OutputMode::Suffix(suffix.to_string())
        }
    }

    pub fn trim(margin: u32, replace: bool) -> Self {
        Self {
            chain: OperationChain::single(Operation::Trim { margin }),
            output: Self::mode(replace, TRIM_SUFFIX),
            skip_same: false,
        }
    }

    pub fn extend(replace: bool) -> Self {
        Self {
            chain: OperationChain::single(Operation::Extend),
            output: Self::mode(replace, EXTEND_SUFFIX),
            skip_same: false,
        }
    }

    pub fn manipulate(chain: OperationChain, replace: bool, skip_same: bool) -> Self {
        Self {
            chain,
            output: Self::mode(replace, MANIPULATE_SUFFIX),
            skip_same,
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written { output: PathBuf },
    NoChange,
    Skipped { reason: String },
}

/// Progress events streamed to the CLI while a batch runs.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    BatchStarted {
        total: usize,
        chain: String,
    },
    FileFinished {
        index: usize,
        path: PathBuf,
        outcome: FileOutcome,
    },
}

/// Per-invocation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub written: usize,
    pub no_change: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.processed += 1;
        match outcome {
            FileOutcome::Written { .. } => self.written += 1,
            FileOutcome::NoChange => self.no_change += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// Load `path`, run the job's chain, and save the result if it changed.
pub fn process_file(
    backend: &impl ImageBackend,
    path: &Path,
    job: &Job,
) -> Result<FileOutcome, ProcessError> {
    let image = backend.load(path)?;
    let (result, modified) = imaging::apply(image, &job.chain, job.skip_same)?;
    if !modified {
        return Ok(FileOutcome::NoChange);
    }
    let output = job.output.output_path(path);
    backend.save(&result, &output)?;
    log::debug!("{} -> {}", path.display(), output.display());
    Ok(FileOutcome::Written { output })
}

fn emit(progress: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = progress {
        // A closed receiver only means nobody is listening.
        tx.send(event).ok();
    }
}

/// Run `job` over every file, continuing past per-file failures.
pub fn process_batch(
    backend: &impl ImageBackend,
    files: &[InputFile],
    job: &Job,
    progress: Option<Sender<ProcessEvent>>,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    emit(
        &progress,
        ProcessEvent::BatchStarted {
            total: files.len(),
            chain: job.chain.to_string(),
        },
    );

    for (i, file) in files.iter().enumerate() {
        let outcome = match process_file(backend, &file.path, job) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("skipping {}: {e}", file.path.display());
                FileOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        };
        summary.record(&outcome);
        emit(
            &progress,
            ProcessEvent::FileFinished {
                index: i + 1,
                path: file.path.clone(),
                outcome,
            },
        );
    }

    summary
}
