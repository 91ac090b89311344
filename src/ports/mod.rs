//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the launcher and an external
//! system (time, filesystem, subprocesses, the storage dispatcher, remote
//! object storage). Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod process;
pub mod provisioner;
pub mod storage;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use process::{Invocation, ProcessRunner};
pub use provisioner::{ProvisionFuture, ProvisionRequest, VolumeProvisioner};
pub use storage::ObjectStore;

/// Boxed error type returned by port methods.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
