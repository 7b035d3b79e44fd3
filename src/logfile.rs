//! The append-only run log.
//!
//! When the user supplies a log directory, every noteworthy event — terminal
//! error messages included — is also appended as a timestamped line to
//! `log.txt` inside that directory. The log is a write-only side channel:
//! the program never reads it back, never truncates it between runs, and
//! treats a failure to write it as a logged warning rather than an error
//! (the run log must never be the reason a run fails).

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::config::normalize_dir;

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "log.txt";

/// Handle to the optional append-only run log.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: Option<PathBuf>,
}

impl RunLog {
    /// Creates a run log rooted at `log_dir`, or a disabled log for `None`.
    ///
    /// The directory path is normalized here so the handle can be built from
    /// raw flags, before validation has run; the directory itself is created
    /// lazily on first append.
    pub fn new(log_dir: Option<&str>) -> Self {
        let path = log_dir
            .filter(|dir| !dir.is_empty())
            .map(|dir| PathBuf::from(format!("{}{LOG_FILE_NAME}", normalize_dir(dir))));
        Self { path }
    }

    /// Creates a run log that drops every entry.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Whether entries are actually persisted.
    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Appends one timestamped entry, best effort.
    ///
    /// The file is opened in append mode and created if absent, so prior
    /// runs' entries are always preserved. Failures are downgraded to a
    /// warning on the log facade.
    pub fn append(&self, entry: &str) {
        let Some(path) = &self.path else {
            return;
        };

        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f %z");
        let line = format!("{timestamp}: {entry}\n");

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(error) = result {
            log::warn!("unable to write run log {}: {error}", path.display());
        }
    }
}
