//! Volume provisioner port for the storage dispatcher.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::error::ProvisionError;

/// Boxed future type alias used by [`VolumeProvisioner`] to keep the trait dyn-compatible.
pub type ProvisionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, ProvisionError>> + Send + 'a>>;

/// A request for a shared storage volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionRequest {
    /// Requested size in GiB.
    pub storage_gib: u32,
    /// Execution-identity token authorizing the request.
    #[serde(skip)]
    pub token: String,
}

/// Provisions shared storage volumes.
pub trait VolumeProvisioner: Send + Sync {
    /// Provisions a volume and returns its claim name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response reports failure.
    fn provision(&self, request: &ProvisionRequest) -> ProvisionFuture<'_>;
}
