//! Single invocation of the test command.

use crate::error::RunError;
use crate::model::{RunOutcome, TestCommand};
use std::process::Stdio;
use tokio::process::Command;

/// Run `command` in the current working directory and wait for it to exit.
///
/// stdin is inherited; stdout and stderr are captured.
///
/// A non-zero exit is a normal outcome here; only a failure to start the
/// process is an error.
pub(crate) async fn run_once(command: &TestCommand) -> Result<RunOutcome, RunError> {
    tracing::debug!(%command, "starting test command");
    let output = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| RunError::Spawn {
            command: command.to_string(),
            source,
        })?;

    let exit_code = output.status.code();
    if exit_code.is_none() {
        tracing::warn!(status = %output.status, "test command terminated without an exit code");
    }
    tracing::debug!(
        ?exit_code,
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "test command finished"
    );

    Ok(RunOutcome {
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
