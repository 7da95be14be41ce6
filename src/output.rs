//! CLI output formatting for batch and rename runs.
//!
//! # File-First Display
//!
//! Each file leads with its positional index and file name. Results are shown
//! after `→` when something was written, or after `:` as a status word when
//! nothing was. Error reasons go on an indented context line.
//!
//! # Output Format
//!
//! ## Batch (`trim`, `extend`, `manipulate`)
//!
//! ```text
//! Chain e,t48 (3 files)
//! 001 acme.png → acme_processed.png
//! 002 flat.png: no change
//! 003 odd.png: skipped
//!     Inconsistent background color: fewer than 3 corners match (best match: 2 of 4).
//! Processed 3 files: 1 written, 1 no change, 1 skipped
//! ```
//!
//! ## Rename
//!
//! ```text
//! 001 IMG_0042.png → renamed/acme.png
//! 002 IMG_0043.png → renamed/globex.png (dry run)
//! 003 acme.png: already named
//! 004 blurry.png: not identified
//! 005 broken.png: failed
//!     Invalid image file 'broken.png': ...
//! Renamed 1 of 5 files
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::process::{BatchSummary, CollectedInputs, FileOutcome, ProcessEvent};
use crate::rename::{RenameOutcome, RenameReport};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `target` relative to the directory of `source`, when it lives under it.
fn relative_to_source(source: &Path, target: &Path) -> String {
    source
        .parent()
        .and_then(|dir| target.strip_prefix(dir).ok())
        .map(|rel| rel.display().to_string())
        .unwrap_or_else(|| target.display().to_string())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Input expansion
// ============================================================================

/// Warnings for command-line paths that contributed no files.
pub fn format_input_warnings(collected: &CollectedInputs) -> Vec<String> {
    let missing = collected
        .missing
        .iter()
        .map(|p| format!("Skipping missing path: {}", p.display()));
    let empty = collected
        .empty_dirs
        .iter()
        .map(|p| format!("No image files in: {}", p.display()));
    missing.chain(empty).collect()
}

pub fn print_input_warnings(collected: &CollectedInputs) {
    for line in format_input_warnings(collected) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Batch output
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::BatchStarted { total, chain } => {
            vec![format!("Chain {} ({})", chain, plural(*total, "file"))]
        }
        ProcessEvent::FileFinished {
            index,
            path,
            outcome,
        } => {
            let head = format!("{} {}", format_index(*index), file_name(path));
            match outcome {
                FileOutcome::Written { output } => {
                    vec![format!("{} → {}", head, relative_to_source(path, output))]
                }
                FileOutcome::NoChange => vec![format!("{}: no change", head)],
                FileOutcome::Skipped { reason } => {
                    vec![format!("{}: skipped", head), format!("{}{}", indent(1), reason)]
                }
            }
        }
    }
}

pub fn format_summary(summary: &BatchSummary) -> String {
    format!(
        "Processed {}: {} written, {} no change, {} skipped",
        plural(summary.processed, "file"),
        summary.written,
        summary.no_change,
        summary.skipped
    )
}

pub fn print_summary(summary: &BatchSummary) {
    println!("{}", format_summary(summary));
}

// ============================================================================
// Rename output
// ============================================================================

pub fn format_rename_reports(reports: &[RenameReport]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut renamed = 0;

    for (i, report) in reports.iter().enumerate() {
        let head = format!("{} {}", format_index(i + 1), file_name(&report.path));
        match &report.result {
            Ok(RenameOutcome::Renamed { to }) => {
                renamed += 1;
                lines.push(format!("{} → {}", head, relative_to_source(&report.path, to)));
            }
            Ok(RenameOutcome::Proposed { to }) => {
                lines.push(format!(
                    "{} → {} (dry run)",
                    head,
                    relative_to_source(&report.path, to)
                ));
            }
            Ok(RenameOutcome::AlreadyNamed) => lines.push(format!("{}: already named", head)),
            Ok(RenameOutcome::Unidentified) => lines.push(format!("{}: not identified", head)),
            Err(e) => {
                lines.push(format!("{}: failed", head));
                lines.push(format!("{}{}", indent(1), e));
            }
        }
    }

    lines.push(format!("Renamed {} of {}", renamed, plural(reports.len(), "file")));
    lines
}

pub fn print_rename_reports(reports: &[RenameReport]) {
    for line in format_rename_reports(reports) {
        println!("{}", line);
    }
}
