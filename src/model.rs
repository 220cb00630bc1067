use std::fmt;
use std::path::PathBuf;

/// Program invoked by every run when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "yarn";
/// Arguments passed to [`DEFAULT_PROGRAM`].
pub const DEFAULT_ARGS: &[&str] = &["test"];

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of iterations; zero or negative means no runs at all.
    pub runs: i64,
    pub command: TestCommand,
    pub log_path: PathBuf,
}

impl RunConfig {
    /// Iterations actually performed for the configured run count.
    pub fn iterations(&self) -> u64 {
        u64::try_from(self.runs).unwrap_or(0)
    }
}

/// The external test-suite runner, treated as an opaque command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl TestCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for TestCommand {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_ARGS.iter().copied())
    }
}

impl fmt::Display for TestCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of one invocation of the test command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutcome {
    pub fn failed(&self) -> bool {
        self.exit_code != Some(0)
    }
}

/// Totals reported once the loop has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub runs: u64,
    pub failures: u64,
}
