//! Failure log naming and formatting.
//!
//! The log is a plain text file named after the wall-clock time the program
//! started. Only failing runs produce output; a clean session leaves it empty.

use crate::error::RunError;
use crate::model::RunOutcome;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day]_[hour][minute][second]");

const SEPARATOR_WIDTH: usize = 50;

/// Current wall-clock time, local when the offset is known.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| {
        tracing::debug!("local UTC offset unavailable, using UTC for log timestamp");
        OffsetDateTime::now_utc()
    })
}

/// Format a timestamp as `YYYYMMDD_HHMMSS`.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String> {
    at.format(TIMESTAMP_FORMAT)
        .context("failed to format log timestamp")
}

/// `test_errors_<timestamp>.txt`, relative to the working directory.
pub fn log_file_name(at: OffsetDateTime) -> Result<PathBuf> {
    Ok(PathBuf::from(format!("test_errors_{}.txt", format_timestamp(at)?)))
}

/// Render the block recorded for a failing run.
///
/// stderr comes first, stdout follows with nothing in between.
pub fn failure_block(run: u64, outcome: &RunOutcome) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    format!(
        "{separator}\nErrors in run {run}:\n{separator}\n{}{}",
        outcome.stderr, outcome.stdout
    )
}

/// Sink for failure blocks.
pub struct FailureLog<W: Write> {
    out: W,
    blocks: u64,
}

impl FailureLog<File> {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: &Path) -> Result<Self, RunError> {
        let file = File::create(path).map_err(|source| RunError::OpenLog {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened failure log");
        Ok(Self::new(file))
    }
}

impl<W: Write> FailureLog<W> {
    pub fn new(out: W) -> Self {
        Self { out, blocks: 0 }
    }

    /// Append the block for a failing run and flush it to the sink.
    pub fn record(&mut self, run: u64, outcome: &RunOutcome) -> Result<(), RunError> {
        let block = failure_block(run, outcome);
        self.out
            .write_all(block.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(RunError::WriteLog)?;
        self.blocks += 1;
        tracing::debug!(run, bytes = block.len(), "recorded failing run");
        Ok(())
    }

    /// Number of blocks written so far.
    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn outcome(code: i32, stderr: &str, stdout: &str) -> RunOutcome {
        RunOutcome {
            exit_code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn timestamp_uses_compact_date_and_time() {
        let at = datetime!(2024-03-07 09:05:02 UTC);
        assert_eq!(format_timestamp(at).unwrap(), "20240307_090502");
    }

    #[test]
    fn log_name_is_deterministic_for_a_fixed_time() {
        let at = datetime!(2025-12-31 23:59:59 UTC);
        assert_eq!(
            log_file_name(at).unwrap(),
            PathBuf::from("test_errors_20251231_235959.txt")
        );
    }

    #[test]
    fn log_name_matches_expected_shape_for_current_time() {
        let name = log_file_name(now()).unwrap();
        let name = name.to_str().unwrap();
        let stamp = name
            .strip_prefix("test_errors_")
            .and_then(|s| s.strip_suffix(".txt"))
            .unwrap();
        assert_eq!(stamp.len(), 15);
        let (date, clock) = stamp.split_at(8);
        assert!(date.chars().all(|c| c.is_ascii_digit()));
        assert!(clock.starts_with('_'));
        assert!(clock[1..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn block_puts_stderr_before_stdout() {
        let block = failure_block(1, &outcome(1, "boom\n", "partial\n"));
        let sep = "=".repeat(50);
        assert_eq!(
            block,
            format!("{sep}\nErrors in run 1:\n{sep}\nboom\npartial\n")
        );
    }

    #[test]
    fn blocks_are_concatenated_in_order() {
        let mut log = FailureLog::new(Vec::new());
        log.record(2, &outcome(1, "e2\n", "o2\n")).unwrap();
        log.record(5, &outcome(2, "e5\n", "")).unwrap();
        assert_eq!(log.blocks(), 2);

        let text = String::from_utf8(log.into_inner()).unwrap();
        let expected = format!(
            "{}{}",
            failure_block(2, &outcome(1, "e2\n", "o2\n")),
            failure_block(5, &outcome(2, "e5\n", ""))
        );
        assert_eq!(text, expected);
        assert_eq!(text.matches("Errors in run").count(), 2);
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_errors_x.txt");
        std::fs::write(&path, "stale contents").unwrap();

        let log = FailureLog::create(&path).unwrap();
        drop(log);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn create_fails_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("log.txt");
        match FailureLog::create(&path) {
            Err(RunError::OpenLog { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected OpenLog error, got {:?}", other.map(|_| ())),
        }
    }
}
