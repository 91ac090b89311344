//! In-memory adapters for tests and dry runs.
//!
//! Each adapter records the calls it receives so tests can assert on what
//! the launcher asked of the outside world. Clones share their recordings,
//! so a test can keep a handle after boxing one into a context.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::error::ProvisionError;
use crate::ports::provisioner::{ProvisionFuture, ProvisionRequest, VolumeProvisioner};
use crate::ports::{Clock, Invocation, ObjectStore, PortError, ProcessRunner};

/// Clock frozen at a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// How a [`StaticProvisioner`] answers.
#[derive(Debug, Clone)]
pub enum ProvisionReply {
    /// Answer with this volume name.
    Volume(String),
    /// Answer with a non-success status.
    Status(u16),
}

/// Provisioner that answers every request the same way.
#[derive(Clone)]
pub struct StaticProvisioner {
    reply: ProvisionReply,
    requests: Arc<Mutex<Vec<ProvisionRequest>>>,
}

impl StaticProvisioner {
    /// Always provisions a volume called `name`.
    #[must_use]
    pub fn volume(name: impl Into<String>) -> Self {
        Self::new(ProvisionReply::Volume(name.into()))
    }

    /// Always fails with `status`.
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self::new(ProvisionReply::Status(status))
    }

    fn new(reply: ProvisionReply) -> Self {
        Self { reply, requests: Arc::default() }
    }

    /// Requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<ProvisionRequest> {
        self.requests.lock().expect("provisioner lock poisoned").clone()
    }
}

impl VolumeProvisioner for StaticProvisioner {
    fn provision(&self, request: &ProvisionRequest) -> ProvisionFuture<'_> {
        self.requests.lock().expect("provisioner lock poisoned").push(request.clone());
        let reply = self.reply.clone();
        Box::pin(async move {
            match reply {
                ProvisionReply::Volume(name) => Ok(name),
                ProvisionReply::Status(status) => {
                    Err(ProvisionError::Status { status, body: "provisioning refused".into() })
                }
            }
        })
    }
}

/// Process runner that exits with a fixed code without spawning anything.
///
/// Optionally writes a file before "exiting", standing in for the log the
/// real pipeline leaves behind.
#[derive(Clone)]
pub struct ScriptedRunner {
    exit_code: Result<i32, String>,
    writes: Option<(PathBuf, String)>,
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl ScriptedRunner {
    /// Runner whose process exits with `code`.
    #[must_use]
    pub fn exiting(code: i32) -> Self {
        Self { exit_code: Ok(code), writes: None, calls: Arc::default() }
    }

    /// Runner whose process fails to start.
    #[must_use]
    pub fn unstartable(message: impl Into<String>) -> Self {
        Self { exit_code: Err(message.into()), writes: None, calls: Arc::default() }
    }

    /// Writes `contents` to `path` on every run.
    #[must_use]
    pub fn writing(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.writes = Some((path.into(), contents.into()));
        self
    }

    /// Invocations received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().expect("runner lock poisoned").clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32, PortError> {
        self.calls.lock().expect("runner lock poisoned").push(invocation.clone());
        let code = self.exit_code.clone()?;
        if let Some((path, contents)) = &self.writes {
            fs::write(path, contents)?;
        }
        Ok(code)
    }
}

/// Object store that records uploads instead of performing them.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    fail_with: Option<String>,
    uploads: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl MemoryObjectStore {
    /// Store that accepts every upload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects every upload with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self { fail_with: Some(message.into()), uploads: Arc::default() }
    }

    /// Uploads attempted so far, as `(local, destination)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn uploads(&self) -> Vec<(PathBuf, String)> {
        self.uploads.lock().expect("store lock poisoned").clone()
    }
}

impl ObjectStore for MemoryObjectStore {
    fn upload(&self, local: &Path, destination: &str) -> Result<(), PortError> {
        self.uploads
            .lock()
            .expect("store lock poisoned")
            .push((local.to_path_buf(), destination.to_string()));
        match &self.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn static_provisioner_records_requests() {
        let provisioner = StaticProvisioner::volume("pvc-7");
        let request = ProvisionRequest { storage_gib: 100, token: "t".into() };

        assert_eq!(provisioner.provision(&request).await.unwrap(), "pvc-7");
        assert_eq!(provisioner.requests(), vec![request]);
    }

    #[test]
    fn scripted_runner_writes_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join(".nextflow.log");
        let runner = ScriptedRunner::exiting(3).writing(&log, "done");
        let invocation = Invocation {
            program: "nextflow".into(),
            args: vec![],
            cwd: dir.path().to_path_buf(),
            env: BTreeMap::new(),
        };

        assert_eq!(runner.run(&invocation).unwrap(), 3);
        assert_eq!(fs::read_to_string(log).unwrap(), "done");
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn failing_store_still_records_the_attempt() {
        let store = MemoryObjectStore::failing("denied");
        assert!(store.upload(Path::new("/a"), "latch:///b").is_err());
        assert_eq!(store.uploads().len(), 1);
    }
}
