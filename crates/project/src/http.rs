//! Thin HTTP client for the workflow backend.
//!
//! - `POST {base}/workflow` with a [`WorkflowDict`] body, answered by `{"id": ...}`
//! - `GET {base}/workflow/{id}/metadata`, answered by a result descriptor

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use workbench_common::{
    RegisterWorkflowResult, ResultDescriptorDict, WorkbenchError, WorkbenchResult, WorkflowDict,
    WorkflowId,
};

use crate::backend::WorkflowBackend;
use crate::config::BackendConfig;

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> WorkbenchResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| WorkbenchError::Backend(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn workflow_url(&self) -> String {
        format!("{}/workflow", self.base_url)
    }

    fn metadata_url(&self, id: WorkflowId) -> String {
        format!("{}/workflow/{}/metadata", self.base_url, id)
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> WorkbenchResult<T> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WorkbenchError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Backend request failed");
            return Err(WorkbenchError::Backend(format!("{}: HTTP {}", what, status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WorkbenchError::Backend(format!("{}: {}", what, e)))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl WorkflowBackend for HttpBackend {
    #[instrument(skip(self, workflow))]
    async fn register_workflow(&self, workflow: &WorkflowDict) -> WorkbenchResult<WorkflowId> {
        let response = self
            .client
            .post(self.workflow_url())
            .json(workflow)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Workflow registration request failed");
                WorkbenchError::Backend(format!("register workflow: {}", e))
            })?;

        let result: RegisterWorkflowResult = Self::decode(response, "register workflow").await?;
        debug!(workflow_id = %result.id, "Backend assigned workflow id");
        Ok(result.id)
    }

    #[instrument(skip(self))]
    async fn get_workflow_metadata(&self, id: WorkflowId) -> WorkbenchResult<ResultDescriptorDict> {
        let response = self
            .client
            .get(self.metadata_url(id))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Workflow metadata request failed");
                WorkbenchError::Backend(format!("workflow metadata {}: {}", id, e))
            })?;

        Self::decode(response, &format!("workflow {} metadata", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let backend = HttpBackend::new(&BackendConfig {
            base_url: "http://localhost:3030/api/".to_string(),
            ..BackendConfig::default()
        })
        .unwrap();
        let id: WorkflowId = "5b9508a8-bd34-5a1c-acd6-75bb832d2d38".parse().unwrap();

        assert_eq!(backend.base_url(), "http://localhost:3030/api");
        assert_eq!(backend.workflow_url(), "http://localhost:3030/api/workflow");
        assert_eq!(
            backend.metadata_url(id),
            "http://localhost:3030/api/workflow/5b9508a8-bd34-5a1c-acd6-75bb832d2d38/metadata"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_backend_error() {
        let backend = HttpBackend::new(&BackendConfig {
            // reserved port, nothing listens there
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: std::time::Duration::from_secs(2),
        })
        .unwrap();

        let err = backend
            .get_workflow_metadata(WorkflowId::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), workbench_common::ErrorKind::Backend);
    }
}
