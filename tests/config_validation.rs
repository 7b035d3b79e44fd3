//! Config validation integration tests.
//!
//! Covers the ordered checks: factor range, quality clamping, size
//! separator, input existence, and directory preparation.

use std::fs;

use tempfile::tempdir;
use video2frames::{Action, Config, Video2FramesError, config::normalize_dir};

fn scratch_config(output_dir: &str, input: &str) -> Config {
    Config {
        input: Some(input.to_string()),
        output_dir: output_dir.to_string(),
        ..Config::default()
    }
}

// ── conversion factor ────────────────────────────────────────────

#[test]
fn factor_zero_rejected() {
    let scratch = tempdir().expect("tempdir");
    let input = scratch.path().join("in.mp4");
    fs::write(&input, b"stub").expect("write input");

    let config = Config {
        factor: 0,
        ..scratch_config(
            scratch.path().to_str().unwrap(),
            input.to_str().unwrap(),
        )
    };
    let error = config.validate().unwrap_err();
    assert!(matches!(error, Video2FramesError::FactorOutOfRange(0)));
}

#[test]
fn factor_above_hundred_rejected() {
    let config = Config {
        factor: 101,
        ..Config::default()
    };
    let error = config.validate().unwrap_err();
    assert!(matches!(error, Video2FramesError::FactorOutOfRange(101)));
}

#[test]
fn factor_bounds_accepted() {
    let scratch = tempdir().expect("tempdir");
    let input = scratch.path().join("in.mp4");
    fs::write(&input, b"stub").expect("write input");

    for factor in [1, 100] {
        let config = Config {
            factor,
            ..scratch_config(
                scratch.path().to_str().unwrap(),
                input.to_str().unwrap(),
            )
        };
        let validated = config.validate().expect("bounds should be accepted");
        assert_eq!(validated.factor, factor);
    }
}

#[test]
fn factor_checked_before_input_existence() {
    // An out-of-range factor must reject even when the input is also bad.
    let config = Config {
        factor: 500,
        input: Some("does-not-exist.mp4".to_string()),
        ..Config::default()
    };
    let error = config.validate().unwrap_err();
    assert!(matches!(error, Video2FramesError::FactorOutOfRange(500)));
}

// ── quality clamping ─────────────────────────────────────────────

#[test]
fn quality_clamped_into_range() {
    let scratch = tempdir().expect("tempdir");
    let input = scratch.path().join("in.mp4");
    fs::write(&input, b"stub").expect("write input");

    let base = scratch_config(scratch.path().to_str().unwrap(), input.to_str().unwrap());

    let high = Config {
        quality: Some(50),
        ..base.clone()
    }
    .validate()
    .expect("clamping never rejects");
    assert_eq!(high.quality, Some(31));

    let low = Config {
        quality: Some(0),
        ..base.clone()
    }
    .validate()
    .expect("clamping never rejects");
    assert_eq!(low.quality, Some(1));

    let in_range = Config {
        quality: Some(17),
        ..base.clone()
    }
    .validate()
    .expect("clamping never rejects");
    assert_eq!(in_range.quality, Some(17));

    let absent = base.validate().expect("absent quality is fine");
    assert_eq!(absent.quality, None);
}

// ── size argument ────────────────────────────────────────────────

#[test]
fn size_without_separator_rejected() {
    let config = Config {
        size: Some("600".to_string()),
        ..Config::default()
    };
    let error = config.validate().unwrap_err();
    assert!(matches!(error, Video2FramesError::MalformedSize(s) if s == "600"));
}

#[test]
fn size_with_either_separator_case_accepted() {
    let scratch = tempdir().expect("tempdir");
    let input = scratch.path().join("in.mp4");
    fs::write(&input, b"stub").expect("write input");

    for size in ["600x800", "600X800"] {
        let config = Config {
            size: Some(size.to_string()),
            ..scratch_config(
                scratch.path().to_str().unwrap(),
                input.to_str().unwrap(),
            )
        };
        let validated = config.validate().expect("separator should be accepted");
        assert_eq!(validated.size.as_deref(), Some(size));
    }
}

#[test]
fn empty_size_treated_as_absent() {
    let scratch = tempdir().expect("tempdir");
    let input = scratch.path().join("in.mp4");
    fs::write(&input, b"stub").expect("write input");

    let config = Config {
        size: Some(String::new()),
        ..scratch_config(
            scratch.path().to_str().unwrap(),
            input.to_str().unwrap(),
        )
    };
    let validated = config.validate().expect("empty size should be ignored");
    assert_eq!(validated.size, None);
}

// ── input file ───────────────────────────────────────────────────

#[test]
fn missing_input_rejected_for_conversion() {
    let error = Config::default().validate().unwrap_err();
    assert!(matches!(error, Video2FramesError::InputMissing));
}

#[test]
fn nonexistent_input_rejected_for_conversion() {
    let config = Config {
        input: Some("no-such-file.mp4".to_string()),
        ..Config::default()
    };
    let error = config.validate().unwrap_err();
    assert!(matches!(error, Video2FramesError::InputUnreadable { .. }));
}

#[test]
fn input_not_required_for_dump() {
    let scratch = tempdir().expect("tempdir");
    let config = Config {
        dump_file: Some("photo.jpg".to_string()),
        output_dir: scratch.path().to_str().unwrap().to_string(),
        ..Config::default()
    };
    let validated = config.validate().expect("dump needs no input file");
    assert_eq!(validated.action(), Action::Dump);
}

#[test]
fn input_not_required_for_template_export() {
    let scratch = tempdir().expect("tempdir");
    let config = Config {
        export_template: true,
        output_dir: scratch.path().to_str().unwrap().to_string(),
        ..Config::default()
    };
    let validated = config.validate().expect("template export needs no input");
    assert_eq!(validated.action(), Action::ExportTemplate);
}

// ── directory preparation ────────────────────────────────────────

#[test]
fn normalize_appends_missing_separator() {
    assert_eq!(normalize_dir("frames"), "frames/");
    assert_eq!(normalize_dir("a/b/c"), "a/b/c/");
}

#[test]
fn normalize_keeps_existing_separator() {
    assert_eq!(normalize_dir("frames/"), "frames/");
    assert_eq!(normalize_dir("frames\\"), "frames\\");
}

#[test]
fn normalize_empty_path_is_current_dir() {
    assert_eq!(normalize_dir(""), "./");
}

#[test]
fn validation_creates_missing_directories() {
    let scratch = tempdir().expect("tempdir");
    let input = scratch.path().join("in.mp4");
    fs::write(&input, b"stub").expect("write input");

    let out_dir = scratch.path().join("out/nested");
    let log_dir = scratch.path().join("logs");

    let config = Config {
        log_dir: Some(log_dir.to_str().unwrap().to_string()),
        ..scratch_config(out_dir.to_str().unwrap(), input.to_str().unwrap())
    };
    let validated = config.validate().expect("directories should be created");

    assert!(out_dir.is_dir());
    assert!(log_dir.is_dir());
    assert!(validated.output_dir.ends_with('/'));
    assert!(validated.log_dir.unwrap().ends_with('/'));
}
