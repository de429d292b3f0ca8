//! Read-only lookups against Galaxy: histories, tools and server version.

use std::sync::Arc;

use amr_galaxy::{GalaxyRequest, GalaxyTransport};
use serde_json::Value;

use crate::{remote_ids, AmrWorkflowError};

pub const DEFAULT_TOOL_SEARCH_QUERY: &str = "amr";

#[derive(Clone)]
/// Pass-through queries for histories and tool metadata.
pub struct GalaxyCatalog {
    transport: Arc<dyn GalaxyTransport>,
}

impl GalaxyCatalog {
    pub fn new(transport: Arc<dyn GalaxyTransport>) -> Self {
        Self { transport }
    }

    pub async fn list_histories(&self) -> Result<Vec<Value>, AmrWorkflowError> {
        fetch_history_list(self.transport.as_ref()).await
    }

    /// Searches the tool panel; a blank query falls back to `amr`.
    pub async fn search_tools(&self, query: &str) -> Result<Value, AmrWorkflowError> {
        let query = match query.trim() {
            "" => DEFAULT_TOOL_SEARCH_QUERY,
            trimmed => trimmed,
        };
        let response = self
            .transport
            .call(GalaxyRequest::get("/tools").with_query("q", query))
            .await?;
        Ok(response.into_json())
    }

    pub async fn tool_detail(&self, tool_id: &str) -> Result<Value, AmrWorkflowError> {
        let tool_id = remote_ids::tool_id(tool_id)?;
        let response = self
            .transport
            .call(GalaxyRequest::get(format!("/tools/{tool_id}")))
            .await?;
        Ok(response.into_json())
    }

    pub async fn galaxy_version(&self) -> Result<Value, AmrWorkflowError> {
        let response = self.transport.call(GalaxyRequest::get("/version")).await?;
        Ok(response.into_json())
    }
}

pub(crate) async fn fetch_history_list(
    transport: &dyn GalaxyTransport,
) -> Result<Vec<Value>, AmrWorkflowError> {
    let response = transport.call(GalaxyRequest::get("/histories")).await?;
    match response.into_json() {
        Value::Array(histories) => Ok(histories),
        other => Err(AmrWorkflowError::unexpected(
            "list histories",
            format!("expected a json array, got {other}"),
        )),
    }
}
