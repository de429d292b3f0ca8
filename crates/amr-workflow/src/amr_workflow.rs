use std::sync::Arc;

use amr_galaxy::GalaxyTransport;
use serde_json::Value;

use crate::{
    AmrWorkflowError, DatasetResult, GalaxyCatalog, JobStatus, StatusTracker, ToolInvocation,
    ToolInvocationResolver, UploadConfig, UploadOrchestrator, UploadedDataset,
    AMRFINDERPLUS_TOOL_CANDIDATES,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub upload: UploadConfig,
    pub tool_candidates: Vec<String>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            upload: UploadConfig::default(),
            tool_candidates: AMRFINDERPLUS_TOOL_CANDIDATES
                .iter()
                .map(|candidate| candidate.to_string())
                .collect(),
        }
    }
}

#[derive(Clone)]
/// Entry point bundling the upload, invocation, status and catalog components.
pub struct AmrWorkflow {
    uploads: UploadOrchestrator,
    tools: ToolInvocationResolver,
    status: StatusTracker,
    catalog: GalaxyCatalog,
}

impl AmrWorkflow {
    pub fn new(transport: Arc<dyn GalaxyTransport>, config: WorkflowConfig) -> Self {
        Self {
            uploads: UploadOrchestrator::new(Arc::clone(&transport), config.upload),
            tools: ToolInvocationResolver::with_candidates(
                Arc::clone(&transport),
                config.tool_candidates,
            ),
            status: StatusTracker::new(Arc::clone(&transport)),
            catalog: GalaxyCatalog::new(transport),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.uploads.config().max_upload_bytes
    }

    pub async fn upload(
        &self,
        file_bytes: &[u8],
        file_name: &str,
    ) -> Result<UploadedDataset, AmrWorkflowError> {
        self.uploads.upload(file_bytes, file_name).await
    }

    pub async fn invoke_amrfinder(
        &self,
        dataset_id: &str,
        organism: &str,
        history_id: Option<&str>,
    ) -> Result<ToolInvocation, AmrWorkflowError> {
        self.tools.invoke(dataset_id, organism, history_id).await
    }

    pub async fn job_status(&self, job_id: &str) -> Result<JobStatus, AmrWorkflowError> {
        self.status.job_status(job_id).await
    }

    pub async fn dataset_result(&self, dataset_id: &str) -> Result<DatasetResult, AmrWorkflowError> {
        self.status.dataset_result(dataset_id).await
    }

    pub async fn list_histories(&self) -> Result<Vec<Value>, AmrWorkflowError> {
        self.catalog.list_histories().await
    }

    pub async fn search_tools(&self, query: &str) -> Result<Value, AmrWorkflowError> {
        self.catalog.search_tools(query).await
    }

    pub async fn tool_detail(&self, tool_id: &str) -> Result<Value, AmrWorkflowError> {
        self.catalog.tool_detail(tool_id).await
    }

    pub async fn galaxy_version(&self) -> Result<Value, AmrWorkflowError> {
        self.catalog.galaxy_version().await
    }
}
