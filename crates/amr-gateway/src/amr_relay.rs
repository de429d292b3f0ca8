//! AMR relay server: routes, shared state and response envelopes.

use std::net::SocketAddr;
use std::sync::Arc;

use amr_galaxy::{GalaxyApiClient, GalaxyClientConfig};
use amr_workflow::{AmrWorkflow, AmrWorkflowError, WorkflowConfig};
use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

mod analysis_handlers;
mod catalog_handlers;
mod endpoints;
mod relay_envelope;
mod server_bootstrap;
mod upload_handlers;


use analysis_handlers::{handle_dataset_result, handle_job_status, handle_run_amrfinder};
use catalog_handlers::{
    handle_health, handle_list_histories, handle_not_found, handle_search_tools,
    handle_test_galaxy, handle_tool_detail,
};
use endpoints::*;
use relay_envelope::{relay_error_response, relay_success_response, workflow_error_response};
use upload_handlers::handle_upload;

pub use server_bootstrap::{build_amr_relay_router, run_amr_relay_server};

#[derive(Debug, Clone)]
/// Relay server settings resolved once at startup.
pub struct AmrRelayServerConfig {
    pub bind: String,
    pub galaxy: GalaxyClientConfig,
    pub workflow: WorkflowConfig,
}

#[derive(Clone)]
/// Shared, immutable state handed to every route handler.
pub struct AmrRelayState {
    workflow: AmrWorkflow,
    galaxy_url: String,
    bind: String,
}

impl AmrRelayState {
    pub fn new(workflow: AmrWorkflow, galaxy_url: impl Into<String>, bind: impl Into<String>) -> Self {
        Self {
            workflow,
            galaxy_url: galaxy_url.into(),
            bind: bind.into(),
        }
    }

    pub fn from_config(config: &AmrRelayServerConfig) -> Result<Self> {
        let client = GalaxyApiClient::new(&config.galaxy)
            .context("failed to construct galaxy api client for amr relay")?;
        let workflow = AmrWorkflow::new(Arc::new(client), config.workflow.clone());
        Ok(Self::new(
            workflow,
            config.galaxy.base_url.trim_end_matches('/'),
            config.bind.clone(),
        ))
    }

    pub fn workflow(&self) -> &AmrWorkflow {
        &self.workflow
    }
}
