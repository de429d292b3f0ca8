use async_trait::async_trait;

use crate::{GalaxyError, GalaxyRequest, GalaxyResponse};

#[async_trait]
/// Trait contract for issuing one request against the Galaxy API.
///
/// Workflow components only depend on this trait so tests can substitute a
/// scripted transport for the live HTTP client.
pub trait GalaxyTransport: Send + Sync {
    async fn call(&self, request: GalaxyRequest) -> Result<GalaxyResponse, GalaxyError>;
}
