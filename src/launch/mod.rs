//! Launch adapter: provision, stage, execute, finalize.
//!
//! A launch walks [`RunState`] from `Idle` to `Done`. Once a volume is held,
//! finalization (uploading the Nextflow log) runs on every exit path, including
//! staging failures, spawn failures, a non-zero pipeline exit, and unwinding
//! panics; see [`FinalizeGuard`].

pub mod outcome;
pub mod projection;
pub mod request;

use std::cell::Cell;

use tracing::{info, warn};

use crate::config::LaunchConfig;
use crate::context::ServiceContext;
use crate::error::{FinalizeWarning, LaunchError, ProvisionError};
use crate::manifest::Manifest;
use crate::ports::{Invocation, ProvisionRequest};

pub use outcome::{ExecutionOutcome, FinalizeReport, LaunchReport, RunState};
pub use projection::{build_command, project_to_flags};
pub use request::{LaunchRequest, RawValues};

/// Drives one pipeline launch against a set of ports.
pub struct Launcher<'a> {
    ctx: &'a ServiceContext,
    config: &'a LaunchConfig,
    manifest: &'a Manifest,
    state: Cell<RunState>,
}

impl<'a> Launcher<'a> {
    /// Creates an idle launcher.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a LaunchConfig, manifest: &'a Manifest) -> Self {
        Self { ctx, config, manifest, state: Cell::new(RunState::Idle) }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state.get()
    }

    fn transition(&self, to: RunState) {
        let from = self.state.replace(to);
        info!(from = %from, to = %to, "launch state");
    }

    /// Requests a shared volume of `storage_gib` from the dispatcher.
    ///
    /// The execution token is checked before any request is made. The call is
    /// attempted exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::MissingExecutionToken`] when no token is
    /// configured, or the dispatcher's failure otherwise.
    pub async fn provision_volume(&self, storage_gib: u32) -> Result<String, ProvisionError> {
        let token = self
            .config
            .execution_token
            .clone()
            .ok_or(ProvisionError::MissingExecutionToken)?;

        info!(storage_gib, "Provisioning shared storage volume");
        let volume =
            self.ctx.provisioner.provision(&ProvisionRequest { storage_gib, token }).await?;
        info!(volume = %volume, "Provisioned shared storage volume");
        Ok(volume)
    }

    /// Copies the packaged pipeline sources into the shared directory.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Staging`] if the copy fails.
    pub fn stage_workspace(&self) -> Result<u64, LaunchError> {
        let (source, target) = (&self.config.source_dir, &self.config.shared_dir);
        let copied = self
            .ctx
            .fs
            .copy_tree(source, target, &self.config.staging_ignore)
            .map_err(|e| LaunchError::Staging {
                from: source.clone(),
                to: target.clone(),
                message: e.to_string(),
            })?;
        info!(files = copied, target = %target.display(), "Staged pipeline sources");
        Ok(copied)
    }

    /// Describes the pipeline process for `argv` inside `volume`.
    #[must_use]
    pub fn invocation(&self, volume: &str, argv: &[String]) -> Invocation {
        let (program, args) = argv.split_first().map_or_else(
            || (self.config.nextflow_bin.display().to_string(), Vec::new()),
            |(program, args)| (program.clone(), args.to_vec()),
        );
        Invocation {
            program,
            args,
            cwd: self.config.shared_dir.clone(),
            env: self.config.process_env(volume),
        }
    }

    /// Runs the pipeline and waits for it to exit.
    ///
    /// A non-zero exit is reported through the returned outcome rather than
    /// as an error; use [`ExecutionOutcome::into_result`] to escalate it.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Spawn`] if the process could not be started.
    pub fn execute(&self, volume: &str, argv: &[String]) -> Result<ExecutionOutcome, LaunchError> {
        let invocation = self.invocation(volume, argv);
        info!(command = %invocation, "Launching Nextflow Runtime");

        let started_at = self.ctx.clock.now();
        let exit_code = self.ctx.process.run(&invocation).map_err(|e| LaunchError::Spawn {
            program: invocation.program.clone(),
            message: e.to_string(),
        })?;
        let finished_at = self.ctx.clock.now();

        let log = self.config.log_path();
        let outcome = ExecutionOutcome {
            exit_code,
            success: exit_code == 0,
            started_at,
            finished_at,
            log_artifact: self.ctx.fs.exists(&log).then_some(log),
        };
        info!(exit_code, success = outcome.success, "Nextflow Runtime exited");
        Ok(outcome)
    }

    /// Uploads the Nextflow log under `execution_name`.
    ///
    /// Never fails: a missing log, a missing execution name, or a failed
    /// upload are logged and reported as warnings.
    pub fn finalize(&self, execution_name: Option<&str>) -> FinalizeReport {
        let mut report = FinalizeReport::default();
        let log = self.config.log_path();

        if !self.ctx.fs.exists(&log) {
            report.warnings.push(FinalizeWarning::MissingLog(log));
        } else if let Some(name) = execution_name.filter(|n| !n.trim().is_empty()) {
            let destination = self.config.log_destination(name);
            info!(destination = %destination, "Uploading .nextflow.log");
            match self.ctx.store.upload(&log, &destination) {
                Ok(()) => report.uploaded_to = Some(destination),
                Err(e) => report.warnings.push(FinalizeWarning::UploadFailed {
                    path: log,
                    destination,
                    message: e.to_string(),
                }),
            }
        } else {
            report.warnings.push(FinalizeWarning::NoExecutionName);
        }

        for warning in &report.warnings {
            warn!("{warning}");
        }
        report
    }

    fn finalize_run(&self) -> FinalizeReport {
        self.transition(RunState::Finalizing);
        let report = self.finalize(self.config.execution_name.as_deref());
        self.transition(RunState::Done);
        report
    }

    /// Runs the whole launch: provision (unless the request names a volume),
    /// stage, execute, and always finalize.
    ///
    /// # Errors
    ///
    /// Returns the provisioning failure, a staging or spawn failure, or
    /// [`LaunchError::PipelineFailed`] carrying the pipeline's exit code.
    /// Finalization has already run whenever an error other than a
    /// provisioning failure is returned.
    pub async fn launch(&self, request: &LaunchRequest) -> Result<LaunchReport, LaunchError> {
        let volume = if let Some(volume) = &request.volume {
            volume.clone()
        } else {
            self.transition(RunState::Provisioning);
            match self.provision_volume(self.config.storage_gib).await {
                Ok(volume) => volume,
                Err(e) => {
                    self.transition(RunState::Failed);
                    return Err(e.into());
                }
            }
        };

        let guard = FinalizeGuard::arm(self);
        let run = self.run_pipeline(&volume, request);
        let succeeded = matches!(&run, Ok((_, outcome)) if outcome.success);
        self.transition(if succeeded { RunState::Succeeded } else { RunState::Failed });
        let finalize = guard.finish();

        let (argv, outcome) = run?;
        let outcome = outcome.into_result()?;
        Ok(LaunchReport { volume, argv, outcome, finalize })
    }

    fn run_pipeline(
        &self,
        volume: &str,
        request: &LaunchRequest,
    ) -> Result<(Vec<String>, ExecutionOutcome), LaunchError> {
        self.transition(RunState::Launching);
        self.stage_workspace()?;
        let argv = build_command(self.config, self.manifest, request);
        self.transition(RunState::Running);
        let outcome = self.execute(volume, &argv)?;
        Ok((argv, outcome))
    }
}

/// Scoped guard that finalizes a launch when it goes out of scope.
///
/// The normal path calls [`FinalizeGuard::finish`] to collect the report;
/// any other exit, including an unwinding panic, finalizes from `Drop`.
pub struct FinalizeGuard<'l, 'a> {
    launcher: &'l Launcher<'a>,
    armed: bool,
}

impl<'l, 'a> FinalizeGuard<'l, 'a> {
    /// Arms finalization for `launcher`.
    #[must_use]
    pub fn arm(launcher: &'l Launcher<'a>) -> Self {
        Self { launcher, armed: true }
    }

    /// Finalizes now and returns the report.
    #[must_use]
    pub fn finish(mut self) -> FinalizeReport {
        self.armed = false;
        self.launcher.finalize_run()
    }
}

impl Drop for FinalizeGuard<'_, '_> {
    fn drop(&mut self) {
        if self.armed {
            self.armed = false;
            let _ = self.launcher.finalize_run();
        }
    }
}
