//! Live process runner using `std::process::Command`.

use std::process::{Command, ExitStatus};

use crate::ports::process::{Invocation, ProcessRunner};
use crate::ports::PortError;

/// Live process runner; the child inherits stdio so pipeline output streams
/// straight into the task log.
pub struct LiveProcessRunner;

impl ProcessRunner for LiveProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32, PortError> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(&invocation.env)
            .status()?;
        Ok(exit_code(status))
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status.code().or_else(|| status.signal().map(|sig| 128 + sig)).unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[cfg(all(test, unix))]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn sh(script: &str, env: &[(&str, &str)]) -> Invocation {
        Invocation {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            cwd: std::env::temp_dir(),
            env: env
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn reports_success() {
        assert_eq!(LiveProcessRunner.run(&sh("exit 0", &[])).unwrap(), 0);
    }

    #[test]
    fn preserves_exit_code() {
        assert_eq!(LiveProcessRunner.run(&sh("exit 137", &[])).unwrap(), 137);
    }

    #[test]
    fn maps_signals_above_128() {
        assert_eq!(LiveProcessRunner.run(&sh("kill -9 $$", &[])).unwrap(), 137);
    }

    #[test]
    fn applies_environment_overlay() {
        let script = "test \"$K8S_STORAGE_CLAIM_NAME\" = pvc-1";
        let code =
            LiveProcessRunner.run(&sh(script, &[("K8S_STORAGE_CLAIM_NAME", "pvc-1")])).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn missing_program_is_an_error() {
        let invocation = Invocation {
            program: "/definitely/not/nextflow".into(),
            args: vec![],
            cwd: std::env::temp_dir(),
            env: BTreeMap::new(),
        };
        assert!(LiveProcessRunner.run(&invocation).is_err());
    }
}
