//! Live adapter for the `VolumeProvisioner` port using the storage dispatcher.

use reqwest::Client;
use serde::Deserialize;

use crate::error::ProvisionError;
use crate::ports::provisioner::{ProvisionFuture, ProvisionRequest, VolumeProvisioner};

/// Provisions volumes by POSTing to the cluster's Nextflow dispatcher.
pub struct HttpVolumeProvisioner {
    client: Client,
    url: String,
}

impl HttpVolumeProvisioner {
    /// Creates a provisioner targeting `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: Client::new(), url: url.into() }
    }
}

/// Success body returned by the dispatcher.
#[derive(Deserialize)]
struct ProvisionResponse {
    name: String,
}

impl VolumeProvisioner for HttpVolumeProvisioner {
    fn provision(&self, request: &ProvisionRequest) -> ProvisionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let response = self
                .client
                .post(&self.url)
                .header("Authorization", format!("Latch-Execution-Token {}", request.token))
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(ProvisionError::Status { status: status.as_u16(), body });
            }

            let parsed: ProvisionResponse = serde_json::from_str(&body)
                .map_err(|e| ProvisionError::MalformedResponse(format!("{e}: {body}")))?;
            Ok(parsed.name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_omits_the_token() {
        let request = ProvisionRequest { storage_gib: 100, token: "secret".into() };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({"storage_gib": 100}));
    }

    #[tokio::test]
    async fn unreachable_dispatcher_is_a_request_error() {
        let provisioner = HttpVolumeProvisioner::new("http://127.0.0.1:9/provision-storage");
        let request = ProvisionRequest { storage_gib: 1, token: "t".into() };
        let err = provisioner.provision(&request).await.unwrap_err();
        assert!(matches!(err, ProvisionError::Request(_)));
    }
}
