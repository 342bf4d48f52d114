//! Raw line recording.
//!
//! Every non-empty line the tool prints is appended verbatim, driver noise
//! and comments included, so the file can be replayed through the parser.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::error::{ReadoutError, Result};

/// File name used when recording is enabled without an explicit path.
pub fn default_record_path(now: DateTime<Local>) -> PathBuf {
    let name = format!("fluke_{}.csv", now.format("%Y%m%d_%H%M%S"));
    std::env::current_dir()
        .map(|d| d.join(&name))
        .unwrap_or_else(|_| PathBuf::from(name))
}

/// Append-only writer, flushed after each line.
pub struct LineRecorder {
    file: File,
    path: PathBuf,
}

impl LineRecorder {
    /// Open (or create) `path` for appending.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ReadoutError::RecorderOpen {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "recording raw lines");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line. Empty lines are skipped; write errors are logged, not returned.
    pub fn record(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return;
        }
        if let Err(e) = writeln!(self.file, "{line}").and_then(|_| self.file.flush()) {
            warn!(path = %self.path.display(), "failed to record line: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_name_has_timestamp() {
        let t = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let p = default_record_path(t);
        assert_eq!(p.file_name().unwrap(), "fluke_20240309_140507.csv");
    }

    #[test]
    fn appends_non_empty_lines() {
        let path = std::env::temp_dir().join(format!("dmm_rec_{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);
        {
            let mut rec = LineRecorder::open(&path).unwrap();
            rec.record("V DC\r");
            rec.record("");
            rec.record("0.5");
        }
        {
            let mut rec = LineRecorder::open(&path).unwrap();
            rec.record("1.#INF");
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "V DC\n0.5\n1.#INF\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn open_failure_names_the_path() {
        let bad = std::env::temp_dir().join("dmm_no_such_dir_98765").join("x.csv");
        match LineRecorder::open(&bad) {
            Err(ReadoutError::RecorderOpen { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected RecorderOpen, got {:?}", other.map(|r| r.path().to_path_buf())),
        }
    }
}
