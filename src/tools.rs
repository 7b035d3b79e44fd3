//! Locating the external tools.
//!
//! All of the real work in this program is delegated to two command-line
//! collaborators: `ffmpeg` for the decode/encode pipeline and `exiftool` for
//! metadata. Before invoking either, the crate probes for it with a cheap
//! version flag; a probe that spawns at all counts as found, regardless of
//! the probe's exit status. `exiftool` gets a second chance in the working
//! directory for installs that ship the tool next to the binary.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::Video2FramesError;

/// Name of the video-processing tool.
pub const FFMPEG: &str = "ffmpeg";

/// Name of the metadata tool.
pub const EXIFTOOL: &str = "exiftool";

/// Locates `ffmpeg` on the search path.
pub fn find_ffmpeg() -> Result<PathBuf, Video2FramesError> {
    match probe(Path::new(FFMPEG), "-version") {
        Ok(()) => Ok(PathBuf::from(FFMPEG)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            Err(Video2FramesError::ToolNotFound {
                tool: FFMPEG.to_string(),
            })
        }
        Err(source) => Err(Video2FramesError::ToolStart {
            tool: FFMPEG.to_string(),
            source,
        }),
    }
}

/// Locates `exiftool` on the search path, falling back to the working
/// directory.
pub fn find_exiftool() -> Result<PathBuf, Video2FramesError> {
    match probe(Path::new(EXIFTOOL), "-ver") {
        Ok(()) => return Ok(PathBuf::from(EXIFTOOL)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            log::debug!("{EXIFTOOL} not on PATH, trying the working directory");
        }
        Err(source) => {
            return Err(Video2FramesError::ToolStart {
                tool: EXIFTOOL.to_string(),
                source,
            });
        }
    }

    let local = std::env::current_dir()
        .unwrap_or_else(|error| {
            log::warn!("could not determine the working directory: {error}");
            PathBuf::from(".")
        })
        .join(EXIFTOOL);

    match probe(&local, "-ver") {
        Ok(()) => Ok(local),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            Err(Video2FramesError::ToolNotFound {
                tool: EXIFTOOL.to_string(),
            })
        }
        Err(source) => Err(Video2FramesError::ToolStart {
            tool: EXIFTOOL.to_string(),
            source,
        }),
    }
}

/// Runs `program version_flag` with all stdio discarded.
///
/// Both tools exit quickly when asked for their version, which makes this a
/// cheap existence check.
fn probe(program: &Path, version_flag: &str) -> io::Result<()> {
    Command::new(program)
        .arg(version_flag)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(drop)
}
