//! Image metadata operations via `exiftool`.
//!
//! Three operations share this module: dumping a file's metadata to the
//! console, writing a small set of camera tags onto the output directory,
//! and exporting a blank JSON template for users to fill in. The tag set is
//! deliberately tiny — make, model, focal length, and the 35mm-equivalent
//! focal length — and the side file holding it is a single JSON object whose
//! keys are fixed by [`ExifRecord`]'s serde renames.

use std::fs;
use std::io::{self, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Video2FramesError;
use crate::logfile::RunLog;
use crate::stream;
use crate::tools;

/// Name of the exported template / expected side file.
pub const TEMPLATE_FILE_NAME: &str = "exif_data.JSON";

/// The metadata record read from or written to the JSON side file.
///
/// Field names on disk are exactly `Make`, `Model`, `Focallength`, and
/// `Focallengthin35mmformat`; absent keys deserialize to empty strings, and
/// empty fields are skipped when building tag assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExifRecord {
    /// Camera make, e.g. `"Canon"`.
    #[serde(rename = "Make", default)]
    pub make: String,
    /// Camera model, e.g. `"EOS R5"`.
    #[serde(rename = "Model", default)]
    pub model: String,
    /// Focal length, e.g. `"50mm"`.
    #[serde(rename = "Focallength", default)]
    pub focal_length: String,
    /// Focal length in 35mm-equivalent terms, e.g. `"75mm"`.
    #[serde(rename = "Focallengthin35mmformat", default)]
    pub focal_length_35mm: String,
}

impl ExifRecord {
    /// The placeholder record written by the template export.
    pub fn template() -> Self {
        Self {
            make: "desired_camera_make".to_string(),
            model: "desired_camera_model".to_string(),
            focal_length: "desired_focallength".to_string(),
            focal_length_35mm: "desired_focallength_in_35mm_format".to_string(),
        }
    }

    /// Whether every field is empty.
    pub fn is_empty(&self) -> bool {
        self.make.is_empty()
            && self.model.is_empty()
            && self.focal_length.is_empty()
            && self.focal_length_35mm.is_empty()
    }

    /// `exiftool` tag-assignment arguments for the non-empty fields.
    pub fn tag_assignments(&self) -> Vec<String> {
        let mut assignments = Vec::new();
        if !self.make.is_empty() {
            assignments.push(format!("-make={}", self.make));
        }
        if !self.model.is_empty() {
            assignments.push(format!("-model={}", self.model));
        }
        if !self.focal_length.is_empty() {
            assignments.push(format!("-FocalLength={}", self.focal_length));
        }
        if !self.focal_length_35mm.is_empty() {
            assignments.push(format!("-FocalLengthIn35mmFormat={}", self.focal_length_35mm));
        }
        assignments
    }
}

/// Writes the blank JSON template into the output directory.
///
/// An existing template of the same name is overwritten. Failing to remove
/// the previous file is a logged warning only; the subsequent write decides
/// whether the export succeeds.
pub fn export_template(config: &Config, run_log: &RunLog) -> Result<(), Video2FramesError> {
    let path = format!("{}{TEMPLATE_FILE_NAME}", config.output_dir);

    if Path::new(&path).exists() {
        if let Err(error) = fs::remove_file(&path) {
            log::warn!("unable to remove previous template {path}: {error}");
            run_log.append(&format!("Unable to remove previous template file: {error}"));
        }
    }

    let data = serde_json::to_string(&ExifRecord::template())
        .map_err(|error| Video2FramesError::TemplateWrite {
            path: path.clone(),
            source: io::Error::other(error),
        })?;

    fs::write(&path, data).map_err(|source| Video2FramesError::TemplateWrite { path, source })
}

/// Reads an [`ExifRecord`] from the JSON side file at `path`.
///
/// Malformed JSON is fatal; a record whose fields are all empty is reported
/// as [`Video2FramesError::EmptyMetadata`] here rather than letting the tag
/// write fail later with a worse message.
pub fn load_record(path: &Path) -> Result<ExifRecord, Video2FramesError> {
    let data = fs::read_to_string(path).map_err(|source| Video2FramesError::MetadataOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let record: ExifRecord =
        serde_json::from_str(&data).map_err(|source| Video2FramesError::MetadataParse {
            path: path.to_path_buf(),
            source,
        })?;

    if record.is_empty() {
        return Err(Video2FramesError::EmptyMetadata {
            path: path.to_path_buf(),
        });
    }
    Ok(record)
}

/// Writes the side file's tags onto the output directory in place.
pub fn write_metadata(config: &Config, run_log: &RunLog) -> Result<(), Video2FramesError> {
    let Some(source) = &config.exif_source else {
        return Ok(());
    };
    let record = load_record(source)?;
    let exiftool = tools::find_exiftool()?;

    let mut args = vec!["-overwrite_original".to_string()];
    args.extend(record.tag_assignments());
    args.push(config.output_dir.clone());
    log::debug!("invoking {} {}", exiftool.display(), args.join(" "));

    let output = Command::new(&exiftool)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| Video2FramesError::ToolStart {
            tool: tools::EXIFTOOL.to_string(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(Video2FramesError::ToolFailed {
            tool: tools::EXIFTOOL.to_string(),
            status: output.status,
            stderr: stderr.trim().to_string(),
        });
    }

    if !stderr.trim().is_empty() {
        run_log.append(stderr.trim_end());
    }
    Ok(())
}

/// Dumps a file's metadata to the console, streaming line by line.
///
/// A reader thread relays `exiftool`'s stdout over a bounded channel; the
/// channel is drained and the reader joined before the exit status is
/// examined, so all output reaches the console before success or failure is
/// reported.
pub fn dump_metadata(target: &str) -> Result<(), Video2FramesError> {
    let exiftool = tools::find_exiftool()?;

    let mut child = Command::new(&exiftool)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| Video2FramesError::ToolStart {
            tool: tools::EXIFTOOL.to_string(),
            source,
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or(Video2FramesError::PipeAttach {
            tool: tools::EXIFTOOL.to_string(),
            stream: "stdout",
        })?;

    let (receiver, reader) = stream::relay(BufReader::new(stdout));
    let mut console = io::stdout().lock();
    stream::drain_to(&receiver, &mut console)?;
    let _ = reader.join();

    let status = child.wait()?;
    if !status.success() {
        return Err(Video2FramesError::ToolFailed {
            tool: tools::EXIFTOOL.to_string(),
            status,
            stderr: "see output above".to_string(),
        });
    }
    Ok(())
}
