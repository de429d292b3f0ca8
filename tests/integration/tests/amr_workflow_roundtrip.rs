use std::collections::VecDeque;
use std::sync::Arc;

use amr_galaxy::{GalaxyError, GalaxyRequest, GalaxyResponse, GalaxyTransport};
use amr_workflow::{
    AmrWorkflow, AmrWorkflowError, RemoteState, UploadConfig, WorkflowConfig,
    AMRFINDERPLUS_TOOL_CANDIDATES,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex as AsyncMutex;

struct ScriptedGalaxy {
    responses: AsyncMutex<VecDeque<Result<GalaxyResponse, GalaxyError>>>,
    requests: AsyncMutex<Vec<GalaxyRequest>>,
}

impl ScriptedGalaxy {
    fn new(responses: Vec<Result<GalaxyResponse, GalaxyError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: AsyncMutex::new(VecDeque::from(responses)),
            requests: AsyncMutex::new(Vec::new()),
        })
    }

    async fn endpoints(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|request| request.endpoint.clone())
            .collect()
    }

    async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl GalaxyTransport for ScriptedGalaxy {
    async fn call(&self, request: GalaxyRequest) -> Result<GalaxyResponse, GalaxyError> {
        self.requests.lock().await.push(request);
        self.responses.lock().await.pop_front().unwrap_or_else(|| {
            Err(GalaxyError::InvalidConfig(
                "scripted galaxy queue exhausted".to_string(),
            ))
        })
    }
}

fn json_ok(value: Value) -> Result<GalaxyResponse, GalaxyError> {
    Ok(GalaxyResponse::Json(value))
}

fn rejected(status: u16, body: &str) -> Result<GalaxyResponse, GalaxyError> {
    Err(GalaxyError::Api {
        method: "POST",
        endpoint: "/tools".to_string(),
        status,
        body: body.to_string(),
    })
}

fn workflow(galaxy: Arc<ScriptedGalaxy>) -> AmrWorkflow {
    AmrWorkflow::new(galaxy, WorkflowConfig::default())
}

#[tokio::test]
async fn integration_upload_without_histories_creates_one_and_returns_its_id() {
    let galaxy = ScriptedGalaxy::new(vec![
        json_ok(json!([])),
        json_ok(json!({"id": "hist1"})),
        json_ok(json!({"id": "ds1", "name": "seq.fasta"})),
        json_ok(json!([{"id": "hist1", "name": "AMRFinder Analysis"}])),
    ]);
    let workflow = workflow(galaxy.clone());

    let uploaded = workflow
        .upload(b">a\nACGTA\n", "seq.fasta")
        .await
        .expect("upload succeeds");
    let histories = workflow.list_histories().await.expect("list histories");

    assert_eq!(uploaded.dataset_id, "ds1");
    assert_eq!(uploaded.dataset_name, "seq.fasta");
    assert_eq!(uploaded.history_id, "hist1");
    assert!(histories
        .iter()
        .any(|history| history["id"] == json!(uploaded.history_id)));
}

#[tokio::test]
async fn integration_oversize_upload_makes_no_remote_calls() {
    let galaxy = ScriptedGalaxy::new(Vec::new());
    let workflow = AmrWorkflow::new(
        galaxy.clone(),
        WorkflowConfig {
            upload: UploadConfig {
                max_upload_bytes: 4,
                ..UploadConfig::default()
            },
            ..WorkflowConfig::default()
        },
    );

    let error = workflow
        .upload(b">a\nACGT\n", "seq.fasta")
        .await
        .expect_err("oversize upload");

    assert!(matches!(error, AmrWorkflowError::Validation(_)));
    assert_eq!(galaxy.request_count().await, 0);
}

#[tokio::test]
async fn integration_invoke_uses_third_candidate_after_two_rejections() {
    let galaxy = ScriptedGalaxy::new(vec![
        rejected(400, "first rejected"),
        rejected(400, "second rejected"),
        json_ok(json!({"jobs": [{"id": "job42"}]})),
    ]);
    let workflow = workflow(galaxy.clone());

    let invocation = workflow
        .invoke_amrfinder("ds1", "Bacteria", Some("hist1"))
        .await
        .expect("invocation succeeds");

    assert_eq!(invocation.job_id, "job42");
    assert_eq!(invocation.tool_id, AMRFINDERPLUS_TOOL_CANDIDATES[2]);
    assert_eq!(galaxy.request_count().await, 3);
}

#[tokio::test]
async fn integration_poll_until_ok_then_fetch_report() {
    let report = "Gene symbol\tClass\nblaCTX-M-15\tBETA-LACTAM\n";
    let galaxy = ScriptedGalaxy::new(vec![
        json_ok(json!({"id": "job42", "state": "queued"})),
        json_ok(json!({"id": "job42", "state": "running"})),
        json_ok(json!({"id": "job42", "state": "ok", "outputs": {"report": {"id": "out1"}}})),
        json_ok(json!({"id": "out1", "state": "ok"})),
        Ok(GalaxyResponse::Text(report.to_string())),
    ]);
    let workflow = workflow(galaxy.clone());

    let mut observed = Vec::new();
    loop {
        let status = workflow.job_status("job42").await.expect("job status");
        observed.push(status.state.clone());
        if status.state.is_terminal() {
            break;
        }
    }
    let result = workflow.dataset_result("out1").await.expect("dataset");

    assert_eq!(
        observed,
        vec![RemoteState::Queued, RemoteState::Running, RemoteState::Ok]
    );
    assert!(result.ready);
    assert_eq!(result.content.as_deref(), Some(report));
    assert_eq!(
        galaxy.endpoints().await,
        vec![
            "/jobs/job42",
            "/jobs/job42",
            "/jobs/job42",
            "/datasets/out1",
            "/datasets/out1/display",
        ]
    );
}

#[tokio::test]
async fn integration_all_candidates_rejected_reports_last_error() {
    let galaxy = ScriptedGalaxy::new(
        (0..AMRFINDERPLUS_TOOL_CANDIDATES.len())
            .map(|index| rejected(400, &format!("candidate {index} rejected")))
            .collect(),
    );
    let workflow = workflow(galaxy.clone());

    let error = workflow
        .invoke_amrfinder("ds1", "Bacteria", None)
        .await
        .expect_err("every candidate rejected");

    match error {
        AmrWorkflowError::AllToolCandidatesFailed { last_error, .. } => {
            assert!(last_error.to_string().contains("candidate 3 rejected"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
