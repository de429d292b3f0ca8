use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use amr_galaxy::{GalaxyError, GalaxyRequest, GalaxyResponse, GalaxyTransport};
use async_trait::async_trait;
use serde_json::Value;

/// Replays queued responses in order and records every request it receives.
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<GalaxyResponse, GalaxyError>>>,
    requests: Mutex<Vec<GalaxyRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(responses: Vec<Result<GalaxyResponse, GalaxyError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from(responses)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<GalaxyRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    pub(crate) fn endpoints(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.endpoint)
            .collect()
    }
}

#[async_trait]
impl GalaxyTransport for ScriptedTransport {
    async fn call(&self, request: GalaxyRequest) -> Result<GalaxyResponse, GalaxyError> {
        self.requests.lock().expect("requests lock").push(request);
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(GalaxyError::InvalidConfig(
                    "scripted response queue exhausted".to_string(),
                ))
            })
    }
}

pub(crate) fn json_ok(value: Value) -> Result<GalaxyResponse, GalaxyError> {
    Ok(GalaxyResponse::Json(value))
}

pub(crate) fn text_ok(text: &str) -> Result<GalaxyResponse, GalaxyError> {
    Ok(GalaxyResponse::Text(text.to_string()))
}

pub(crate) fn api_error(
    endpoint: &str,
    status: u16,
    body: &str,
) -> Result<GalaxyResponse, GalaxyError> {
    Err(GalaxyError::Api {
        method: "POST",
        endpoint: endpoint.to_string(),
        status,
        body: body.to_string(),
    })
}
