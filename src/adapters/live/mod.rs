//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;
pub mod process;
pub mod provisioner;
pub mod storage;
