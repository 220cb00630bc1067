//! Sequential run loop.
//!
//! Each iteration prints its progress line, waits for the test command to
//! exit, and appends a failure block to the log when the exit was non-zero.
//! A run never starts before the previous child has exited.

use super::runner::run_once;
use crate::log_file::FailureLog;
use crate::model::{RunConfig, RunSummary};
use anyhow::{Context, Result};
use std::io::Write;

/// Drive `cfg.runs` iterations of the test command.
pub(crate) async fn run_loop<L, C>(
    cfg: &RunConfig,
    log: &mut FailureLog<L>,
    console: &mut C,
) -> Result<RunSummary>
where
    L: Write,
    C: Write,
{
    let total = cfg.iterations();
    let mut summary = RunSummary::default();

    for run in 1..=total {
        writeln!(console, "\nRun {run}/{}", cfg.runs).context("failed to write progress")?;
        console.flush().context("failed to write progress")?;

        let outcome = run_once(&cfg.command).await?;
        summary.runs += 1;

        if outcome.failed() {
            tracing::info!(run, exit_code = ?outcome.exit_code, "test run failed");
            log.record(run, &outcome)?;
            summary.failures += 1;
        }
    }

    Ok(summary)
}
