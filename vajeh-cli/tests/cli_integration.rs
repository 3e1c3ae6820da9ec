//! Integration tests for the vajeh CLI.
//!
//! These cover the flag surface and the startup failure paths. They never
//! need a tesseract install, a real font, or image fixtures: every check
//! under test fires before recognition would start.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn vajeh() -> Command {
    Command::cargo_bin("vajeh").unwrap()
}

#[test]
fn help_describes_the_surface() {
    vajeh()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("IMAGES"))
        .stdout(predicate::str::contains("--mask"))
        .stdout(predicate::str::contains("--flush-trailing"))
        .stdout(predicate::str::contains("--strict-ocr"));
}

#[test]
fn version_is_reported() {
    vajeh()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vajeh"));
}

#[test]
fn missing_font_fails_before_any_work() {
    // The default font path is not shipped with the repository, so the
    // run must fail at the resource check, whatever else is missing.
    vajeh()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing resource: font"));
}

#[test]
fn missing_image_source_is_reported() {
    let dir = TempDir::new().unwrap();
    let font = dir.path().join("font.ttf");
    fs::write(&font, b"placeholder").unwrap();

    vajeh()
        .arg(dir.path().join("no-such-images"))
        .arg("--font")
        .arg(&font)
        .assert()
        .failure()
        .stderr(predicate::str::contains("image source not found"));
}

#[test]
fn empty_image_directory_is_reported() {
    let dir = TempDir::new().unwrap();
    let font = dir.path().join("font.ttf");
    fs::write(&font, b"placeholder").unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();

    vajeh()
        .arg(&images)
        .arg("--font")
        .arg(&font)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no images found"));
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("vajeh.toml");
    fs::write(&config, "[render\nwidth = ").unwrap();

    vajeh()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn missing_stopword_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let font = dir.path().join("font.ttf");
    fs::write(&font, b"placeholder").unwrap();

    vajeh()
        .arg("--font")
        .arg(&font)
        .arg("--stopwords")
        .arg(dir.path().join("no-such-stopwords.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read stopwords"));
}
