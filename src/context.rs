//! Service context bundling all port trait objects.

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::process::LiveProcessRunner;
use crate::adapters::live::provisioner::HttpVolumeProvisioner;
use crate::adapters::live::storage::LiveObjectStore;
use crate::config::LaunchConfig;
use crate::ports::{Clock, FileSystem, ObjectStore, ProcessRunner, VolumeProvisioner};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. [`ServiceContext::live`]
/// wires the real adapters; tests build the struct directly with in-memory ones.
pub struct ServiceContext {
    /// Clock for timestamping runs.
    pub clock: Box<dyn Clock>,
    /// Filesystem for staging and log discovery.
    pub fs: Box<dyn FileSystem>,
    /// Runner for the pipeline subprocess.
    pub process: Box<dyn ProcessRunner>,
    /// Shared volume provisioner.
    pub provisioner: Box<dyn VolumeProvisioner>,
    /// Remote storage for run artifacts.
    pub store: Box<dyn ObjectStore>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live(config: &LaunchConfig) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            process: Box::new(LiveProcessRunner),
            provisioner: Box::new(HttpVolumeProvisioner::new(&config.dispatcher_url)),
            store: Box::new(LiveObjectStore::new()),
        }
    }
}
