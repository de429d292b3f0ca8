use amr_workflow::DEFAULT_ORGANISM;

use super::*;

#[derive(Debug, Deserialize)]
pub(super) struct RunAmrFinderRequest {
    #[serde(default)]
    dataset_id: Option<String>,
    #[serde(default)]
    organism: Option<String>,
    #[serde(default)]
    history_id: Option<String>,
}

pub(super) async fn handle_run_amrfinder(
    State(state): State<Arc<AmrRelayState>>,
    payload: Result<Json<RunAmrFinderRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return relay_error_response(
                StatusCode::BAD_REQUEST,
                "validation_error",
                &rejection.body_text(),
            );
        }
    };

    let result = state
        .workflow
        .invoke_amrfinder(
            request.dataset_id.as_deref().unwrap_or_default(),
            request.organism.as_deref().unwrap_or(DEFAULT_ORGANISM),
            request.history_id.as_deref(),
        )
        .await;
    match result {
        Ok(invocation) => relay_success_response(json!({
            "job_id": invocation.job_id,
            "tool_id": invocation.tool_id,
            "attempts": invocation.attempts,
            "job_info": invocation.job_info,
        })),
        Err(error) => workflow_error_response("run amrfinder", &error),
    }
}

pub(super) async fn handle_job_status(
    State(state): State<Arc<AmrRelayState>>,
    Path(job_id): Path<String>,
) -> Response {
    match state.workflow.job_status(&job_id).await {
        Ok(status) => relay_success_response(json!({
            "job_id": status.job_id,
            "state": status.state,
            "job_info": status.job_info,
        })),
        Err(error) => workflow_error_response("job status", &error),
    }
}

/// Not-ready datasets answer `success: false, ready: false` with the observed state.
pub(super) async fn handle_dataset_result(
    State(state): State<Arc<AmrRelayState>>,
    Path(dataset_id): Path<String>,
) -> Response {
    match state.workflow.dataset_result(&dataset_id).await {
        Ok(result) if result.ready => relay_success_response(json!({
            "ready": true,
            "dataset_id": result.dataset_id,
            "state": result.state,
            "content": result.content,
            "dataset_info": result.dataset_info,
        })),
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "success": false,
                "ready": false,
                "dataset_id": result.dataset_id,
                "state": result.state,
                "error": "dataset is not ready yet",
                "dataset_info": result.dataset_info,
            })),
        )
            .into_response(),
        Err(error) => workflow_error_response("dataset result", &error),
    }
}
