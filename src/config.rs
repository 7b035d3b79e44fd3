//! Run configuration.
//!
//! [`Config`] is the single flat record of user-supplied settings, built once
//! from parsed command-line flags and validated into an immutable value that
//! is passed by reference to every operation. Validation also performs the
//! two normalizations the rest of the crate relies on: the quality factor is
//! clamped into range, and directory paths gain a trailing separator before
//! the directories are created.
//!
//! # Example
//!
//! ```no_run
//! use video2frames::Config;
//!
//! let config = Config {
//!     input: Some("input.mp4".to_string()),
//!     output_dir: "frames".to_string(),
//!     ..Config::default()
//! }
//! .validate()
//! .unwrap();
//!
//! assert_eq!(config.output_dir, "frames/");
//! ```

use std::fs;
use std::path::PathBuf;

use crate::error::Video2FramesError;

/// The one primary action a run performs.
///
/// Selected from the flags by [`Config::action`]: a metadata dump wins over a
/// template export when both are requested, and frame conversion runs only
/// when neither is. Metadata writing is not an action of its own; it composes
/// after whichever action ran (see [`Config::exif_source`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Invoke the video tool to turn the input file into still frames.
    Convert,
    /// Invoke the metadata tool and stream its report for a file.
    Dump,
    /// Write a blank JSON metadata template into the output directory.
    ExportTemplate,
}

/// User-supplied run configuration.
///
/// Construct with struct-update syntax over [`Config::default`], then call
/// [`validate`](Config::validate) before handing the value to any operation.
#[derive(Debug, Clone)]
#[must_use]
pub struct Config {
    /// Input video file. Required when the action is [`Action::Convert`].
    pub input: Option<String>,
    /// Output directory. Separator-terminated after validation.
    pub output_dir: String,
    /// Output frame size as `WxH`, e.g. `"600x800"`.
    pub size: Option<String>,
    /// Log directory. Separator-terminated after validation; `None` disables
    /// the run log entirely.
    pub log_dir: Option<String>,
    /// File whose metadata should be dumped instead of converting.
    pub dump_file: Option<String>,
    /// JSON side file with metadata tags to write after the primary action.
    pub exif_source: Option<PathBuf>,
    /// Prefix prepended to every output frame filename.
    pub prefix: String,
    /// Suffix appended to every output frame filename, before the extension.
    pub suffix: String,
    /// Out of every 100 input frames, convert this many. Range 1-100.
    pub factor: i64,
    /// Encoder quality factor. Clamped into 1-31 by validation when present.
    pub quality: Option<i64>,
    /// Convert output frames to grayscale.
    pub grayscale: bool,
    /// Emit compressed PNG frames instead of uncompressed BMP.
    pub compress: bool,
    /// Export the JSON metadata template instead of converting.
    pub export_template: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: ".".to_string(),
            size: None,
            log_dir: None,
            dump_file: None,
            exif_source: None,
            prefix: String::new(),
            suffix: String::new(),
            factor: 100,
            quality: None,
            grayscale: false,
            compress: false,
            export_template: false,
        }
    }
}

impl Config {
    /// Selects the primary action for this configuration.
    pub fn action(&self) -> Action {
        if self.dump_file.as_deref().is_some_and(|f| !f.is_empty()) {
            Action::Dump
        } else if self.export_template {
            Action::ExportTemplate
        } else {
            Action::Convert
        }
    }

    /// Checks the configuration and normalizes it into its final form.
    ///
    /// Checks run in order: conversion factor range, quality clamping, size
    /// separator, input-file existence (conversion only), then directory
    /// preparation for the output and log directories. The first failing
    /// check returns its error; nothing is retried or downgraded.
    pub fn validate(mut self) -> Result<Self, Video2FramesError> {
        if !(1..=100).contains(&self.factor) {
            return Err(Video2FramesError::FactorOutOfRange(self.factor));
        }

        if let Some(quality) = self.quality {
            self.quality = Some(quality.clamp(1, 31));
        }

        if let Some(size) = self.size.take() {
            if size.is_empty() {
                // An empty -s is treated as absent.
            } else if !size.contains(['x', 'X']) {
                return Err(Video2FramesError::MalformedSize(size));
            } else {
                self.size = Some(size);
            }
        }

        if self.action() == Action::Convert {
            match self.input.as_deref() {
                None | Some("") => return Err(Video2FramesError::InputMissing),
                Some(input) => {
                    fs::metadata(input).map_err(|error| Video2FramesError::InputUnreadable {
                        path: input.to_string(),
                        reason: error.to_string(),
                    })?;
                }
            }
        }

        self.output_dir = prepare_dir(&self.output_dir)?;
        if let Some(log_dir) = self.log_dir.take() {
            self.log_dir = Some(prepare_dir(&log_dir)?);
        }

        Ok(self)
    }
}

/// Appends a trailing separator to `path` unless one is already present.
///
/// An empty path is treated as the current directory. Paths already ending
/// in `/` or `\` are returned unchanged, so output patterns can be formed by
/// plain concatenation.
pub fn normalize_dir(path: &str) -> String {
    if path.is_empty() {
        return "./".to_string();
    }
    if path.ends_with(['/', '\\']) {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Normalizes `path` and creates the directory tree beneath it if missing.
fn prepare_dir(path: &str) -> Result<String, Video2FramesError> {
    let normalized = normalize_dir(path);
    fs::create_dir_all(&normalized).map_err(|source| {
        log::warn!("failed to create {normalized}: {source}");
        Video2FramesError::DirectoryCreate {
            path: normalized.clone(),
            source,
        }
    })?;
    Ok(normalized)
}
