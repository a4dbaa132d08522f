//! End-to-end tests for the CLI commands.
//!
//! Commands are driven through the library entry points against temporary
//! directories of real PNG files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use snapshade_backend::png::{write_rgba, PngConfig};
use snapshade_backend::{decode_file, PixelBuffer};
use snapshade_cli::commands::{apply, batch, validate};

fn write_photo(path: &Path, shade: u8) {
    let photo = PixelBuffer::from_fn(32, 16, |x, y| {
        [shade, (x * 8) as u8, (y * 16) as u8, 255]
    })
    .unwrap();
    write_rgba(&photo, path, &PngConfig::default()).unwrap();
}

fn write_jpeg(path: &Path, rgb: [u8; 3]) {
    image::RgbImage::from_pixel(32, 16, image::Rgb(rgb))
        .save(path)
        .unwrap();
}

fn write_recipe(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("recipe.json");
    std::fs::write(&path, json).unwrap();
    path
}

// ============================================================================
// Apply
// ============================================================================

#[test]
fn test_apply_writes_filtered_png() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in.png");
    let out = tmp.path().join("out.png");
    write_photo(&input, 10);

    let code = apply::run(
        input.to_str().unwrap(),
        Some("invert"),
        &[],
        None,
        out.to_str(),
        false,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let result = decode_file(&out).unwrap();
    assert_eq!((result.width(), result.height()), (32, 16));
    assert_eq!(result.get(0, 0), [245, 255, 255, 255]);
}

#[test]
fn test_apply_ascii_recipe_to_file() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in.png");
    let out = tmp.path().join("art.txt");
    write_photo(&input, 0);
    let recipe = write_recipe(
        tmp.path(),
        r#"{"recipe_version": 1, "filter": {"kind": "ascii", "columns": 16}}"#,
    );

    let code = apply::run(
        input.to_str().unwrap(),
        None,
        &[],
        recipe.to_str(),
        out.to_str(),
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    // 16 * 16 / 32 * 0.5 = 4 rows
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().all(|l| l.chars().count() == 16));
}

#[test]
fn test_apply_unknown_filter_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in.png");
    write_photo(&input, 0);

    let code = apply::run(
        input.to_str().unwrap(),
        Some("emboss"),
        &[],
        None,
        Some("-"),
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
}

// ============================================================================
// Batch
// ============================================================================

#[test]
fn test_batch_processes_tree_deterministically() {
    let tmp = tempfile::tempdir().unwrap();
    let photos = tmp.path().join("photos");
    std::fs::create_dir_all(photos.join("trip")).unwrap();
    write_photo(&photos.join("a.png"), 40);
    write_photo(&photos.join("trip").join("b.png"), 200);
    std::fs::write(photos.join("readme.txt"), "skip me").unwrap();
    let recipe = write_recipe(
        tmp.path(),
        r#"{"recipe_version": 1, "filter": {"kind": "vintage", "seed": 11}}"#,
    );

    let run = |out: &Path| {
        batch::run(
            photos.to_str().unwrap(),
            recipe.to_str().unwrap(),
            out.to_str().unwrap(),
            true,
        )
        .unwrap()
    };

    let first = tmp.path().join("out1");
    let second = tmp.path().join("out2");
    assert_eq!(run(&first), ExitCode::SUCCESS);
    assert_eq!(run(&second), ExitCode::SUCCESS);

    for rel in ["a.png", "trip/b.png"] {
        let a = std::fs::read(first.join(rel)).unwrap();
        let b = std::fs::read(second.join(rel)).unwrap();
        assert_eq!(a, b, "{} should be byte-identical across runs", rel);
    }
    assert!(!first.join("readme.png").exists());
}

#[test]
fn test_batch_reports_corrupt_input() {
    let tmp = tempfile::tempdir().unwrap();
    let photos = tmp.path().join("photos");
    std::fs::create_dir_all(&photos).unwrap();
    write_photo(&photos.join("good.png"), 90);
    std::fs::write(photos.join("broken.jpg"), b"garbage").unwrap();
    let recipe = write_recipe(
        tmp.path(),
        r#"{"recipe_version": 1, "filter": {"kind": "grayscale"}}"#,
    );
    let out = tmp.path().join("out");

    let code = batch::run(
        photos.to_str().unwrap(),
        recipe.to_str().unwrap(),
        out.to_str().unwrap(),
        false,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
    // The good file is still written
    assert!(out.join("good.png").exists());
    assert!(!out.join("broken.png").exists());
}

#[test]
fn test_batch_refuses_to_overwrite_same_stem() {
    let tmp = tempfile::tempdir().unwrap();
    let photos = tmp.path().join("photos");
    std::fs::create_dir_all(&photos).unwrap();
    write_jpeg(&photos.join("cat.jpg"), [200, 100, 50]);
    write_photo(&photos.join("cat.png"), 10);
    let recipe = write_recipe(
        tmp.path(),
        r#"{"recipe_version": 1, "filter": {"kind": "invert"}}"#,
    );
    let out = tmp.path().join("out");

    let code = batch::run(
        photos.to_str().unwrap(),
        recipe.to_str().unwrap(),
        out.to_str().unwrap(),
        false,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));

    let written: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(written, vec!["cat.png"]);

    // cat.jpg sorts first and keeps the output; the PNG would give red 245
    let result = decode_file(&out.join("cat.png")).unwrap();
    let [r, g, b, a] = result.get(16, 8);
    assert!(r.abs_diff(55) <= 6, "red {}", r);
    assert!(g.abs_diff(155) <= 6, "green {}", g);
    assert!(b.abs_diff(205) <= 6, "blue {}", b);
    assert_eq!(a, 255);
}

#[test]
fn test_batch_empty_directory_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let recipe = write_recipe(
        tmp.path(),
        r#"{"recipe_version": 1, "filter": {"kind": "sepia"}}"#,
    );
    let empty = tmp.path().join("empty");
    std::fs::create_dir(&empty).unwrap();

    let code = batch::run(
        empty.to_str().unwrap(),
        recipe.to_str().unwrap(),
        tmp.path().join("out").to_str().unwrap(),
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn test_validate_rejects_out_of_range() {
    let tmp = tempfile::tempdir().unwrap();
    let recipe = write_recipe(
        tmp.path(),
        r#"{"recipe_version": 1, "filter": {"kind": "vignette", "radius": 1.5}}"#,
    );
    let code = validate::run(recipe.to_str().unwrap(), true).unwrap();
    assert_eq!(code, ExitCode::from(1));
}
