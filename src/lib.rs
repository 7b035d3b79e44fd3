//! # video2frames
//!
//! Turn a video file into a sequence of still frames.
//!
//! `video2frames` is a thin, validated wrapper around two external
//! command-line collaborators: `ffmpeg`, which performs the actual decoding
//! and image encoding, and `exiftool`, which reads and writes image
//! metadata. This crate contributes no codec of its own; its job is flag
//! validation, directory preparation, external-process argument
//! construction, and best-effort run logging.
//!
//! ## Quick Start
//!
//! ### Extract Frames
//!
//! ```no_run
//! use video2frames::{Config, RunLog};
//!
//! let config = Config {
//!     input: Some("input.mp4".to_string()),
//!     output_dir: "frames".to_string(),
//!     ..Config::default()
//! }
//! .validate()
//! .unwrap();
//!
//! video2frames::extract::convert(&config, &RunLog::disabled()).unwrap();
//! ```
//!
//! ### Dump Metadata
//!
//! ```no_run
//! video2frames::exif::dump_metadata("photo.jpg").unwrap();
//! ```
//!
//! ### Export a Metadata Template
//!
//! ```no_run
//! use video2frames::{Config, RunLog};
//!
//! let config = Config {
//!     export_template: true,
//!     ..Config::default()
//! }
//! .validate()
//! .unwrap();
//!
//! video2frames::exif::export_template(&config, &RunLog::disabled()).unwrap();
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Video2FramesError`]. Every failure is
//! terminal by design: validation errors, filesystem errors, and non-zero
//! exits from either external tool all propagate to the caller, which
//! decides on the exit code. Exactly two conditions are downgraded to
//! warnings — failing to remove a previous template file, and failing to
//! write the run log itself.

pub mod config;
pub mod error;
pub mod exif;
pub mod extract;
pub mod logfile;
pub mod stream;
pub mod tools;

pub use config::{Action, Config};
pub use error::Video2FramesError;
pub use exif::ExifRecord;
pub use logfile::RunLog;
