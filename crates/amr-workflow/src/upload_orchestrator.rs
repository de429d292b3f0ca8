//! Dataset upload into a Galaxy history.

use std::borrow::Cow;
use std::sync::Arc;

use amr_galaxy::{GalaxyRequest, GalaxyResponse, GalaxyTransport};
use serde::Serialize;
use serde_json::{json, Value};

use crate::galaxy_catalog::fetch_history_list;
use crate::AmrWorkflowError;

pub const DEFAULT_HISTORY_NAME: &str = "AMRFinder Analysis";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Limits and naming used when registering uploads.
pub struct UploadConfig {
    pub max_upload_bytes: usize,
    pub history_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            history_name: DEFAULT_HISTORY_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetDescriptor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Result of a successful upload.
pub struct UploadedDataset {
    pub dataset_id: String,
    pub dataset_name: String,
    pub history_id: String,
    pub upload_info: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The response shapes Galaxy returns for pasted-content uploads.
pub enum UploadResponseShape {
    /// `{"id": ..., "name": ...}` at the top level.
    DirectDataset(DatasetDescriptor),
    /// Tool-style `{"outputs": [{"id": ..., "name": ...}, ...]}`.
    ToolOutputs(DatasetDescriptor),
    Unrecognized,
}

impl UploadResponseShape {
    /// Classifies an upload response. Missing names fall back to `fallback_name`.
    pub fn parse(response: &Value, fallback_name: &str) -> Self {
        if let Some(descriptor) = dataset_descriptor(response, fallback_name) {
            return Self::DirectDataset(descriptor);
        }
        let first_output = response
            .get("outputs")
            .and_then(Value::as_array)
            .and_then(|outputs| outputs.first());
        match first_output.and_then(|output| dataset_descriptor(output, fallback_name)) {
            Some(descriptor) => Self::ToolOutputs(descriptor),
            None => Self::Unrecognized,
        }
    }

    pub fn into_descriptor(self) -> Option<DatasetDescriptor> {
        match self {
            Self::DirectDataset(descriptor) | Self::ToolOutputs(descriptor) => Some(descriptor),
            Self::Unrecognized => None,
        }
    }
}

fn dataset_descriptor(value: &Value, fallback_name: &str) -> Option<DatasetDescriptor> {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())?;
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(fallback_name);
    Some(DatasetDescriptor {
        id: id.to_string(),
        name: name.to_string(),
    })
}

#[derive(Clone)]
/// Resolves the working history and registers uploaded files in it.
pub struct UploadOrchestrator {
    transport: Arc<dyn GalaxyTransport>,
    config: UploadConfig,
}

impl UploadOrchestrator {
    pub fn new(transport: Arc<dyn GalaxyTransport>, config: UploadConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub async fn upload(
        &self,
        file_bytes: &[u8],
        file_name: &str,
    ) -> Result<UploadedDataset, AmrWorkflowError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(AmrWorkflowError::validation("uploaded file has no name"));
        }
        if file_bytes.len() > self.config.max_upload_bytes {
            return Err(AmrWorkflowError::validation(format!(
                "file '{file_name}' is {} bytes, exceeding the {} byte upload limit",
                file_bytes.len(),
                self.config.max_upload_bytes
            )));
        }

        tracing::info!(
            file_name,
            size_bytes = file_bytes.len(),
            "uploading dataset to galaxy"
        );
        let history_id = self.resolve_history().await?;
        tracing::debug!(history_id = history_id.as_str(), "using galaxy history");

        let paste_content = String::from_utf8_lossy(file_bytes);
        if matches!(paste_content, Cow::Owned(_)) {
            tracing::warn!(
                file_name,
                "uploaded file is not valid utf-8; invalid sequences were replaced"
            );
        }
        let payload = json!({
            "src": "pasted",
            "paste_content": paste_content,
            "name": file_name,
            "file_type": "auto",
            "dbkey": "?",
        });
        let response = self
            .transport
            .call(GalaxyRequest::post(
                format!("/histories/{history_id}/contents"),
                payload,
            ))
            .await?;

        let upload_info = match response {
            GalaxyResponse::Json(value) => value,
            GalaxyResponse::Text(body) => {
                return Err(AmrWorkflowError::UnrecognizedUploadResponse { body });
            }
        };
        let Some(descriptor) = UploadResponseShape::parse(&upload_info, file_name).into_descriptor()
        else {
            tracing::warn!(
                history_id = history_id.as_str(),
                "galaxy upload response matched no known shape"
            );
            return Err(AmrWorkflowError::UnrecognizedUploadResponse {
                body: upload_info.to_string(),
            });
        };

        tracing::info!(
            dataset_id = descriptor.id.as_str(),
            history_id = history_id.as_str(),
            "dataset registered in galaxy"
        );
        Ok(UploadedDataset {
            dataset_id: descriptor.id,
            dataset_name: descriptor.name,
            history_id,
            upload_info,
        })
    }

    /// Returns the first listed history, creating one when the list is empty.
    ///
    /// "First" is Galaxy's list order; no recency ordering is applied.
    pub async fn resolve_history(&self) -> Result<String, AmrWorkflowError> {
        let histories = fetch_history_list(self.transport.as_ref()).await?;
        if let Some(first) = histories.first() {
            return first
                .get("id")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
                .ok_or_else(|| {
                    AmrWorkflowError::unexpected("list histories", "first history has no id")
                });
        }

        tracing::info!(
            history_name = self.config.history_name.as_str(),
            "no galaxy history found; creating one"
        );
        let created = self
            .transport
            .call(GalaxyRequest::post(
                "/histories",
                json!({ "name": self.config.history_name }),
            ))
            .await?;
        created
            .as_json()
            .and_then(|value| value.get("id"))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or_else(|| AmrWorkflowError::unexpected("create history", "response has no id"))
    }
}
