use std::path::PathBuf;

/// Fatal conditions that stop the run loop.
///
/// A test command exiting non-zero is not one of these; it is recorded in the
/// log and the loop moves on.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to open log file {}", path.display())]
    OpenLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to log file")]
    WriteLog(#[source] std::io::Error),

    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
