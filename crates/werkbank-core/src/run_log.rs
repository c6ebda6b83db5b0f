// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run log: append-only plain-text record of a batch job's progress.
//
// Each line is `<RFC 3339 timestamp> <message>`. The file is opened in append
// mode for every line and never truncated or rotated.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

use crate::error::Result;

/// Append-only progress log for a single job.
///
/// Write failures are reported through `tracing` and otherwise ignored, so a
/// broken log never aborts the job it describes.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: Option<PathBuf>,
}

impl RunLog {
    /// Use `path` as the log file, creating parent directories if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path: Some(path.to_path_buf()),
        })
    }

    /// A log that discards every line.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one line.
    pub fn log(&self, message: impl AsRef<str>) {
        let Some(path) = &self.path else {
            return;
        };
        let line = format!("{} {}\n", Utc::now().to_rfc3339(), message.as_ref());
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(err) = written {
            warn!(path = %path.display(), %err, "Failed to append to run log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_appended_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.txt");

        RunLog::open(&path).unwrap().log("Script started");
        RunLog::open(&path).unwrap().log("Script finished");

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" Script started"));
        assert!(lines[1].ends_with(" Script finished"));
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let log = RunLog::disabled();
        log.log("ignored");
        assert!(log.path().is_none());
    }

    #[test]
    fn unwritable_log_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let log = RunLog::open(dir.path()).unwrap();
        log.log("still fine");
    }
}
