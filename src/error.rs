//! Error types for parameter resolution, provisioning, and launching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or resolving parameter values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Two specs in one manifest share a name.
    #[error("duplicate parameter in manifest: {name}")]
    Duplicate {
        /// The repeated parameter name.
        name: String,
    },

    /// A value was supplied for a name the manifest does not declare.
    #[error("unknown parameter: {name}")]
    Unknown {
        /// The undeclared name.
        name: String,
    },

    /// A required parameter resolved to no value.
    #[error("missing required parameter: {name}")]
    MissingRequired {
        /// The required parameter name.
        name: String,
    },

    /// A value could not be interpreted as the declared kind.
    #[error("parameter {name} expects {expected}, got {found}")]
    TypeMismatch {
        /// The parameter name.
        name: String,
        /// The declared kind.
        expected: &'static str,
        /// A rendering of the offending value.
        found: String,
    },

    /// A `name=value` override could not be split.
    #[error("invalid assignment {0:?}: expected NAME=VALUE")]
    InvalidAssignment(String),
}

/// Errors raised while provisioning the shared storage volume.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The execution-identity token is not configured.
    #[error("failed to get execution token")]
    MissingExecutionToken,

    /// The request never produced a response.
    #[error("provisioning request failed: {0}")]
    Request(String),

    /// The dispatcher answered with a non-success status.
    #[error("provisioning failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The dispatcher answered without a volume name.
    #[error("malformed provisioning response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ProvisionError {
    fn from(err: reqwest::Error) -> Self {
        ProvisionError::Request(err.to_string())
    }
}

/// Errors that abort a launch.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Volume provisioning failed.
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// Parameter values did not resolve against the manifest.
    #[error(transparent)]
    Params(#[from] ParamError),

    /// The pipeline sources could not be copied into the shared volume.
    #[error("failed to stage {} into {}: {message}", from.display(), to.display())]
    Staging {
        /// Packaged source directory.
        from: PathBuf,
        /// Shared directory.
        to: PathBuf,
        /// Underlying failure.
        message: String,
    },

    /// The pipeline process could not be started.
    #[error("failed to start {program}: {message}")]
    Spawn {
        /// The executable that failed to start.
        program: String,
        /// Underlying failure.
        message: String,
    },

    /// The pipeline ran and exited non-zero.
    #[error("pipeline exited with status {exit_code}")]
    PipelineFailed {
        /// The process exit code.
        exit_code: i32,
    },
}

impl LaunchError {
    /// Exit code the CLI should terminate with for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::PipelineFailed { exit_code } if *exit_code != 0 => *exit_code,
            _ => 1,
        }
    }
}

/// Non-fatal conditions raised while finalizing a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinalizeWarning {
    /// No log file was written by the pipeline.
    #[error("no log file at {0}")]
    MissingLog(PathBuf),

    /// The platform did not assign an execution name.
    #[error(
        "skipping logs upload, no execution name (pass --execution-name or set PHAGELAUNCH_EXECUTION_NAME)"
    )]
    NoExecutionName,

    /// The upload was attempted and failed.
    #[error("failed to upload {path} to {destination}: {message}")]
    UploadFailed {
        /// Local log path.
        path: PathBuf,
        /// Remote destination.
        destination: String,
        /// Underlying failure.
        message: String,
    },
}
