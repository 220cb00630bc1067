use crate::log_file::{self, FailureLog};
use crate::model::{RunConfig, RunSummary, TestCommand};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use time::OffsetDateTime;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "test-loop",
    version,
    about = "Runs yarn test multiple times and saves errors"
)]
pub struct Cli {
    /// Number of test runs
    #[arg(allow_negative_numbers = true)]
    pub runs: i64,
}

/// Build a `RunConfig` from CLI arguments and the program start time.
pub fn build_config(args: &Cli, started_at: OffsetDateTime) -> Result<RunConfig> {
    Ok(RunConfig {
        runs: args.runs,
        command: TestCommand::default(),
        log_path: log_file::log_file_name(started_at)?,
    })
}

pub async fn run(args: Cli) -> Result<()> {
    let cfg = build_config(&args, log_file::now())?;
    let stdout = std::io::stdout();
    let mut console = stdout.lock();
    run_with_config(&cfg, &mut console).await?;
    Ok(())
}

/// Open the log, drive every run, and print the header and footer around them.
async fn run_with_config<C: Write>(cfg: &RunConfig, console: &mut C) -> Result<RunSummary> {
    let log_path = cfg.log_path.display();
    writeln!(console, "Running {} test iterations...", cfg.runs)?;
    writeln!(console, "Errors will be saved to file: {log_path}")?;

    let mut log = FailureLog::create(&cfg.log_path)?;
    tracing::info!(runs = cfg.runs, command = %cfg.command, "starting test loop");

    let summary = crate::orchestrator::run_loop(cfg, &mut log, console)
        .await
        .with_context(|| format!("test loop aborted; partial results are in {log_path}"))?;

    writeln!(console, "\nDone! All errors have been saved to {log_path}")?;
    tracing::info!(
        runs = summary.runs,
        failures = summary.failures,
        blocks = log.blocks(),
        "test loop finished"
    );
    Ok(summary)
}
