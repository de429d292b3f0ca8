use std::sync::Arc;

use amr_galaxy::{GalaxyRequest, GalaxyTransport};
use serde::Serialize;
use serde_json::Value;

use crate::remote_ids::encoded_id;
use crate::{AmrWorkflowError, RemoteState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatus {
    pub job_id: String,
    pub state: RemoteState,
    pub job_info: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetResult {
    pub dataset_id: String,
    pub ready: bool,
    pub state: RemoteState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub dataset_info: Value,
}

#[derive(Clone)]
/// Observes job and dataset state. Every call fetches fresh state from Galaxy.
pub struct StatusTracker {
    transport: Arc<dyn GalaxyTransport>,
}

impl StatusTracker {
    pub fn new(transport: Arc<dyn GalaxyTransport>) -> Self {
        Self { transport }
    }

    pub async fn job_status(&self, job_id: &str) -> Result<JobStatus, AmrWorkflowError> {
        let job_id = encoded_id(job_id, "job_id")?;
        let job_info = self
            .transport
            .call(GalaxyRequest::get(format!("/jobs/{job_id}")))
            .await?
            .into_json();
        let state = RemoteState::from_descriptor(&job_info)
            .ok_or_else(|| AmrWorkflowError::unexpected("job status", "job has no state"))?;
        tracing::debug!(job_id, state = state.as_str(), "galaxy job state");
        Ok(JobStatus {
            job_id: job_id.to_string(),
            state,
            job_info,
        })
    }

    /// Fetches dataset metadata and, only once the state is `ok`, its plain-text content.
    pub async fn dataset_result(&self, dataset_id: &str) -> Result<DatasetResult, AmrWorkflowError> {
        let dataset_id = encoded_id(dataset_id, "dataset_id")?;
        let dataset_info = self
            .transport
            .call(GalaxyRequest::get(format!("/datasets/{dataset_id}")))
            .await?
            .into_json();
        let state = RemoteState::from_descriptor(&dataset_info)
            .ok_or_else(|| AmrWorkflowError::unexpected("dataset status", "dataset has no state"))?;

        if !state.is_ok() {
            tracing::debug!(dataset_id, state = state.as_str(), "dataset not ready");
            return Ok(DatasetResult {
                dataset_id: dataset_id.to_string(),
                ready: false,
                state,
                content: None,
                dataset_info,
            });
        }

        let content = self
            .transport
            .call(GalaxyRequest::get(format!("/datasets/{dataset_id}/display")).accept_text())
            .await?
            .into_text();
        tracing::info!(
            dataset_id,
            content_bytes = content.len(),
            "dataset content fetched"
        );
        Ok(DatasetResult {
            dataset_id: dataset_id.to_string(),
            ready: true,
            state,
            content: Some(content),
            dataset_info,
        })
    }
}
