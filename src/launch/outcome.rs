//! Run states and results.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{FinalizeWarning, LaunchError};

/// Lifecycle of one launch.
///
/// `Finalizing` follows every state after `Provisioning`, including failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Nothing started yet.
    Idle,
    /// Requesting the shared volume.
    Provisioning,
    /// Staging sources and building the command.
    Launching,
    /// Pipeline process running.
    Running,
    /// Pipeline exited zero.
    Succeeded,
    /// Staging, spawn, or the pipeline itself failed.
    Failed,
    /// Uploading the run log.
    Finalizing,
    /// All work finished.
    Done,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Provisioning => "provisioning",
            RunState::Launching => "launching",
            RunState::Running => "running",
            RunState::Succeeded => "succeeded",
            RunState::Failed => "failed",
            RunState::Finalizing => "finalizing",
            RunState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of running the pipeline process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionOutcome {
    /// Process exit code.
    pub exit_code: i32,
    /// Whether the process exited zero.
    pub success: bool,
    /// When the process was started.
    pub started_at: DateTime<Utc>,
    /// When the process exited.
    pub finished_at: DateTime<Utc>,
    /// Log written by the pipeline, if one was found.
    pub log_artifact: Option<PathBuf>,
}

impl ExecutionOutcome {
    /// Converts a failed outcome into [`LaunchError::PipelineFailed`].
    ///
    /// # Errors
    ///
    /// Returns the error when the process exited non-zero.
    pub fn into_result(self) -> Result<Self, LaunchError> {
        if self.success {
            Ok(self)
        } else {
            Err(LaunchError::PipelineFailed { exit_code: self.exit_code })
        }
    }
}

/// What finalization did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    /// Remote location the log was uploaded to.
    pub uploaded_to: Option<String>,
    /// Conditions that prevented the upload.
    pub warnings: Vec<FinalizeWarning>,
}

/// Everything a completed launch produced.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchReport {
    /// Volume the pipeline ran in.
    pub volume: String,
    /// Full command line that was executed.
    pub argv: Vec<String>,
    /// Process result.
    pub outcome: ExecutionOutcome,
    /// Log upload result.
    pub finalize: FinalizeReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(exit_code: i32) -> ExecutionOutcome {
        let now = Utc::now();
        ExecutionOutcome {
            exit_code,
            success: exit_code == 0,
            started_at: now,
            finished_at: now,
            log_artifact: None,
        }
    }

    #[test]
    fn zero_exit_is_ok() {
        assert!(outcome(0).into_result().is_ok());
    }

    #[test]
    fn nonzero_exit_carries_its_code() {
        let err = outcome(137).into_result().unwrap_err();
        assert!(matches!(err, LaunchError::PipelineFailed { exit_code: 137 }));
    }

    #[test]
    fn states_render_lowercase() {
        assert_eq!(RunState::Finalizing.to_string(), "finalizing");
    }
}
