//! Frame extraction via `ffmpeg`.
//!
//! This module owns the one piece of logic the program actually contributes
//! to conversion: building the `ffmpeg` argument list from a validated
//! [`Config`] and running it. The input frame rate is pinned to 1 and the
//! output rate set to `factor / 100`, which is what gives the conversion
//! factor its "out of every 100 frames, convert N" meaning. Everything else
//! is pass-through.
//!
//! `ffmpeg` writes its progress chatter to stderr, so stderr is captured
//! while stdout is inherited; on success the captured chatter is appended to
//! the run log, on failure its tail rides along in the error.

use std::process::{Command, Stdio};

use crate::config::Config;
use crate::error::Video2FramesError;
use crate::logfile::RunLog;
use crate::tools;

/// Extension used for uncompressed output frames.
pub const UNCOMPRESSED_EXT: &str = ".bmp";

/// Extension used for compressed output frames.
pub const COMPRESSED_EXT: &str = ".png";

/// How many trailing stderr lines to fold into a failure message.
const STDERR_TAIL_LINES: usize = 8;

/// Output frame extension for `config`.
pub fn extension(config: &Config) -> &'static str {
    if config.compress {
        COMPRESSED_EXT
    } else {
        UNCOMPRESSED_EXT
    }
}

/// Output filename pattern, `<outdir><prefix>frame%03d<suffix><ext>`.
///
/// `output_dir` is separator-terminated after validation, so plain
/// concatenation is well formed.
pub fn output_pattern(config: &Config) -> String {
    format!(
        "{}{}frame%03d{}{}",
        config.output_dir,
        config.prefix,
        config.suffix,
        extension(config)
    )
}

/// The output frame rate for a conversion factor, formatted minimally.
///
/// Factor 100 renders as `1`, factor 25 as `0.25`.
pub fn output_rate(factor: i64) -> String {
    format!("{}", factor as f64 / 100.0)
}

/// Builds the full `ffmpeg` argument list for `config`.
///
/// The optional grayscale filter, resolution, and quality flags appear only
/// when the corresponding setting is present; the pattern is always last.
pub fn ffmpeg_args(config: &Config) -> Vec<String> {
    let input = config.input.clone().unwrap_or_default();

    let mut args = vec![
        "-r".to_string(),
        "1".to_string(),
        "-i".to_string(),
        input,
        "-r".to_string(),
        output_rate(config.factor),
    ];

    if config.grayscale {
        args.push("-vf".to_string());
        args.push("format=gray".to_string());
    }
    if let Some(size) = &config.size {
        args.push("-s".to_string());
        args.push(size.clone());
    }
    if let Some(quality) = config.quality {
        args.push("-q:v".to_string());
        args.push(quality.to_string());
    }

    args.push(output_pattern(config));
    args
}

/// Runs the frame extraction for a validated `config`.
pub fn convert(config: &Config, run_log: &RunLog) -> Result<(), Video2FramesError> {
    let ffmpeg = tools::find_ffmpeg()?;
    let args = ffmpeg_args(config);
    log::debug!("invoking {} {}", ffmpeg.display(), args.join(" "));

    let output = Command::new(&ffmpeg)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| Video2FramesError::ToolStart {
            tool: tools::FFMPEG.to_string(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(Video2FramesError::ToolFailed {
            tool: tools::FFMPEG.to_string(),
            status: output.status,
            stderr: stderr_tail(&stderr),
        });
    }

    if !stderr.trim().is_empty() {
        run_log.append(stderr.trim_end());
    }
    Ok(())
}

/// The last few non-empty lines of a captured stderr buffer.
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::{output_rate, stderr_tail};

    #[test]
    fn output_rate_formats_minimally() {
        assert_eq!(output_rate(100), "1");
        assert_eq!(output_rate(25), "0.25");
        assert_eq!(output_rate(50), "0.5");
        assert_eq!(output_rate(1), "0.01");
    }

    #[test]
    fn stderr_tail_keeps_only_last_lines() {
        let buffer: String = (0..20).map(|i| format!("line {i}\n")).collect();
        let tail = stderr_tail(&buffer);
        assert!(tail.starts_with("line 12"));
        assert!(tail.ends_with("line 19"));
    }

    #[test]
    fn stderr_tail_drops_blank_lines() {
        assert_eq!(stderr_tail("one\n\n\ntwo\n"), "one\ntwo");
    }
}
