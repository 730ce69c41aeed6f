use std::process::ExitCode;

/// Exit status of an mfv run.
///
/// - `Success` (0): no unignored errors, or an edit command finished
/// - `Failure` (1): validation reported errors, or `init` found an existing config
/// - `Error` (2): the run was aborted (bad config, missing source locale, I/O)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
