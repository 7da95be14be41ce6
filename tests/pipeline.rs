//! End-to-end tests: real image files on disk through the public library API.
//!
//! Each test builds its inputs in a temp directory, runs a job through
//! `process_batch` with the `image`-crate backend, and inspects the files left
//! behind.

use image::{ColorType, DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use logokit::config::FilesConfig;
use logokit::imaging::{OperationChain, RustBackend};
use logokit::process::{BatchSummary, FileOutcome, Job, ProcessEvent, collect_files, process_batch};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn extensions() -> Vec<String> {
    FilesConfig::default().extensions
}

/// 60x40 white canvas with a 10x10 red block at (20, 10).
fn block_logo() -> RgbImage {
    let mut img = RgbImage::from_pixel(60, 40, Rgb([255, 255, 255]));
    for y in 10..20 {
        for x in 20..30 {
            img.put_pixel(x, y, Rgb([200, 0, 0]));
        }
    }
    img
}

fn run(dir: &Path, job: &Job) -> BatchSummary {
    let collected = collect_files(&[dir.to_path_buf()], &extensions());
    process_batch(&RustBackend::new(), &collected.files, job, None)
}

#[test]
fn trim_directory_writes_only_changed_files() {
    let tmp = TempDir::new().unwrap();
    block_logo().save(tmp.path().join("logo.png")).unwrap();
    RgbImage::from_pixel(16, 16, Rgb([30, 30, 30]))
        .save(tmp.path().join("flat.png"))
        .unwrap();
    fs::write(tmp.path().join("notes.txt"), "not an image").unwrap();

    let summary = run(tmp.path(), &Job::trim(2, false));

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.no_change, 1);
    let trimmed = image::open(tmp.path().join("logo_trimmed.png")).unwrap();
    assert_eq!((trimmed.width(), trimmed.height()), (14, 14));
    assert_eq!(trimmed.color(), ColorType::Rgb8);
    assert!(!tmp.path().join("flat_trimmed.png").exists());
}

#[test]
fn trimming_trimmed_output_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("logo.png");
    block_logo().save(&path).unwrap();

    let first = run(tmp.path(), &Job::trim(4, true));
    let bytes_after_first = fs::read(&path).unwrap();
    let second = run(tmp.path(), &Job::trim(4, true));

    assert_eq!(first.written, 1);
    assert_eq!(second.no_change, 1);
    assert_eq!(fs::read(&path).unwrap(), bytes_after_first);
}

#[test]
fn extend_in_place_keeps_transparency() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("mark.png");
    let mut img = RgbaImage::from_pixel(8, 6, Rgba([0, 0, 0, 0]));
    img.put_pixel(4, 3, Rgba([0, 0, 255, 255]));
    img.save(&path).unwrap();

    let summary = run(tmp.path(), &Job::extend(true));

    assert_eq!(summary.written, 1);
    let out = image::open(&path).unwrap().to_rgba8();
    assert_eq!(out.dimensions(), (24, 18));
    assert_eq!(out.get_pixel(0, 0)[3], 0);
    assert_eq!(out.get_pixel(12, 9), &Rgba([0, 0, 255, 255]));
}

#[test]
fn extend_chain_on_jpeg_keeps_rgb() {
    let tmp = TempDir::new().unwrap();
    let mut img = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));
    for y in 16..24 {
        for x in 16..24 {
            img.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    img.save(tmp.path().join("brand.jpg")).unwrap();

    let chain: OperationChain = "e".parse().unwrap();
    let summary = run(tmp.path(), &Job::manipulate(chain, false, true));

    assert_eq!(summary.written, 1);
    let out = image::open(tmp.path().join("brand_processed.jpg")).unwrap();
    assert_eq!((out.width(), out.height()), (120, 120));
    assert_eq!(out.color(), ColorType::Rgb8);
}

#[test]
fn round_trip_chain_is_skipped_when_identical() {
    let tmp = TempDir::new().unwrap();
    let mut img = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
    for (x, y) in [(0, 0), (9, 0), (0, 9), (9, 9)] {
        img.put_pixel(x, y, Rgb([0, 0, 0]));
    }
    img.save(tmp.path().join("frame.png")).unwrap();

    let chain: OperationChain = "e,t0".parse().unwrap();
    let summary = run(tmp.path(), &Job::manipulate(chain.clone(), false, true));
    assert_eq!(summary.no_change, 1);
    assert!(!tmp.path().join("frame_processed.png").exists());

    let summary = run(tmp.path(), &Job::manipulate(chain, false, false));
    assert_eq!(summary.written, 1);
    let out = image::open(tmp.path().join("frame_processed.png")).unwrap();
    assert_eq!(out.to_rgb8(), img);
}

#[test]
fn inconsistent_corners_skip_the_file() {
    let tmp = TempDir::new().unwrap();
    let mut img = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
    img.put_pixel(0, 19, Rgb([0, 0, 0]));
    img.put_pixel(19, 19, Rgb([0, 0, 0]));
    img.save(tmp.path().join("odd.png")).unwrap();
    let (tx, rx) = std::sync::mpsc::channel();

    let collected = collect_files(&[tmp.path().to_path_buf()], &extensions());
    let summary = process_batch(&RustBackend::new(), &collected.files, &Job::trim(0, false), Some(tx));

    assert_eq!(summary.skipped, 1);
    assert!(!tmp.path().join("odd_trimmed.png").exists());
    let reasons: Vec<String> = rx
        .iter()
        .filter_map(|event| match event {
            ProcessEvent::FileFinished {
                outcome: FileOutcome::Skipped { reason },
                ..
            } => Some(reason),
            _ => None,
        })
        .collect();
    assert_eq!(reasons.len(), 1);
    assert!(reasons[0].contains("fewer than 3 corners match"));
}

#[test]
fn corrupt_file_is_skipped_and_batch_continues() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a_broken.png"), "garbage").unwrap();
    block_logo().save(tmp.path().join("b_logo.png")).unwrap();

    let summary = run(tmp.path(), &Job::trim(0, false));

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.written, 1);
    assert!(tmp.path().join("b_logo_trimmed.png").exists());
}

#[test]
fn grayscale_png_stays_grayscale() {
    let tmp = TempDir::new().unwrap();
    let mut img = GrayImage::from_pixel(30, 30, Luma([250]));
    img.put_pixel(12, 14, Luma([5]));
    img.save(tmp.path().join("gray.png")).unwrap();

    run(tmp.path(), &Job::trim(1, false));

    let out = image::open(tmp.path().join("gray_trimmed.png")).unwrap();
    assert_eq!(out.color(), ColorType::L8);
    assert_eq!((out.width(), out.height()), (3, 3));
    assert_eq!(out.as_luma8().unwrap().get_pixel(1, 1), &Luma([5]));
}

#[test]
fn decoded_layouts_match_what_was_saved() {
    // Guard for the round-trip test above: PNG keeps RGB8 exactly.
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("x.png");
    block_logo().save(&path).unwrap();
    let loaded: DynamicImage = image::open(&path).unwrap();
    assert_eq!(loaded.color(), ColorType::Rgb8);
    assert_eq!(loaded.to_rgb8(), block_logo());
}
