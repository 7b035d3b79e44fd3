//! Error types for the `video2frames` crate.
//!
//! This module defines [`Video2FramesError`], the unified error type returned
//! by all fallible operations in the crate. Errors carry enough context to
//! diagnose the problem at the top-level handler: offending values, paths,
//! tool names, exit statuses, and captured stderr.

use std::{io::Error as IoError, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// The unified error type for all `video2frames` operations.
///
/// Every public function that can fail returns
/// `Result<T, Video2FramesError>`. Every error is terminal: the binary's
/// top-level handler appends the message to the run log, prints it, and
/// exits non-zero. There is no recovery path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Video2FramesError {
    /// The conversion factor was outside the accepted percentage range.
    #[error("Conversion factor must be within range 1-100%, got {0}")]
    FactorOutOfRange(i64),

    /// The size argument lacked a width/height separator.
    #[error("Size argument must be provided in the following format: WxH, got \"{0}\"")]
    MalformedSize(String),

    /// No input video file was supplied and the selected action needs one.
    #[error("Source file not provided (use: -i source.mp4)")]
    InputMissing,

    /// The input video file does not exist or could not be read.
    #[error("Could not read the source file {path}: {reason}")]
    InputUnreadable {
        /// Path that was passed as the input file.
        path: String,
        /// Underlying reason the read failed.
        reason: String,
    },

    /// An output or log directory could not be created.
    #[error("Could not create directory {path}: {source}")]
    DirectoryCreate {
        /// Directory that could not be created.
        path: String,
        /// Underlying filesystem error.
        source: IoError,
    },

    /// The metadata template file could not be written.
    #[error("Could not write metadata template to {path}: {source}")]
    TemplateWrite {
        /// Destination of the template file.
        path: String,
        /// Underlying filesystem error.
        source: IoError,
    },

    /// The metadata side file parsed but every field was empty.
    #[error("Metadata source {path} contains no fields to write")]
    EmptyMetadata {
        /// Path of the JSON side file.
        path: PathBuf,
    },

    /// The metadata side file could not be opened or read.
    #[error("Could not open metadata file {path}: {source}")]
    MetadataOpen {
        /// Path of the JSON side file.
        path: PathBuf,
        /// Underlying filesystem error.
        source: IoError,
    },

    /// The metadata side file is not a valid JSON record.
    #[error("Error decoding metadata file {path}: {source}")]
    MetadataParse {
        /// Path of the JSON side file.
        path: PathBuf,
        /// Underlying JSON decode error.
        source: serde_json::Error,
    },

    /// An external tool could not be located.
    #[error("Unable to find {tool} on the search path")]
    ToolNotFound {
        /// Name of the missing tool.
        tool: String,
    },

    /// An external tool was found but could not be started.
    #[error("Failed to start {tool}: {source}")]
    ToolStart {
        /// Name of the tool.
        tool: String,
        /// Underlying spawn error.
        source: IoError,
    },

    /// An external tool ran but exited with a failure status.
    #[error("{tool} exited unsuccessfully ({status}): {stderr}")]
    ToolFailed {
        /// Name of the tool.
        tool: String,
        /// Exit status reported by the operating system.
        status: ExitStatus,
        /// Tail of the tool's captured standard error, when available.
        stderr: String,
    },

    /// A stdio pipe to an external tool could not be attached.
    #[error("Failed to attach to {tool} {stream}")]
    PipeAttach {
        /// Name of the tool.
        tool: String,
        /// Which stream failed to attach (`"stdout"` or `"stderr"`).
        stream: &'static str,
    },

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}
