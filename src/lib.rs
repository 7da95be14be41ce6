//! # logokit
//!
//! Batch tools for logo images: trim uniform borders, extend the canvas
//! around a logo, chain the two, and rename files after the company a logo
//! belongs to.
//!
//! # Architecture
//!
//! Every image command runs the same pipeline:
//!
//! ```text
//! paths     →  collect_files   →  InputFile list   (directories expanded, sorted)
//! InputFile →  ImageBackend    →  DynamicImage     (decoded, native layout kept)
//! image     →  chain::apply    →  (image, modified)
//! modified  →  ImageBackend    →  <stem>_<suffix>.<ext> or in place
//! ```
//!
//! The pixel transforms in [`imaging`] are pure functions over in-memory
//! images, so tests exercise them on synthetic images without any files.
//! Storage sits behind [`imaging::ImageBackend`]; tests swap in a recording
//! mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Background estimation, content bounds, trim, extend, operation chains, image I/O |
//! | [`process`] | Input expansion, output naming, per-file and batch execution |
//! | [`rename`] | Classifier-driven renaming with sanitization and collision handling |
//! | [`config`] | `logokit.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting for batch and rename runs |
//!
//! # Design Decisions
//!
//! ## Two Views of One Image
//!
//! Comparisons (corner consensus, content box, identity checks) run on an
//! RGBA8 copy so every layout compares the same way. Crops, and extend
//! canvases for layouts without alpha, are built from the image as decoded,
//! so a grayscale or 16-bit input leaves the tool in its own layout with its
//! samples untouched.
//!
//! ## Corners For Trim, Edges For Extend
//!
//! Trim refuses to guess: at least three corners must share a color before
//! anything is cut. Extend only needs a fill color, so it takes the majority
//! over the whole border and never fails on a non-empty image.
//!
//! ## Nothing Written Without A Change
//!
//! A file is saved only when its chain reports a modification. Re-running a
//! command over its own output is therefore a no-op.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod rename;
