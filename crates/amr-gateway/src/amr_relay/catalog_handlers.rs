use amr_workflow::DEFAULT_TOOL_SEARCH_QUERY;

use super::*;

#[derive(Debug, Deserialize)]
pub(super) struct ToolSearchQuery {
    #[serde(default)]
    q: Option<String>,
}

pub(super) async fn handle_health(State(state): State<Arc<AmrRelayState>>) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "galaxy_url": state.galaxy_url,
            "bind": state.bind,
        })),
    )
        .into_response()
}

pub(super) async fn handle_test_galaxy(State(state): State<Arc<AmrRelayState>>) -> Response {
    match state.workflow.galaxy_version().await {
        Ok(version) => relay_success_response(json!({
            "galaxy_version": version,
            "api_key_valid": true,
        })),
        Err(error) => workflow_error_response("test galaxy", &error),
    }
}

pub(super) async fn handle_list_histories(State(state): State<Arc<AmrRelayState>>) -> Response {
    match state.workflow.list_histories().await {
        Ok(histories) => relay_success_response(json!({ "histories": histories })),
        Err(error) => workflow_error_response("list histories", &error),
    }
}

pub(super) async fn handle_search_tools(
    State(state): State<Arc<AmrRelayState>>,
    Query(query): Query<ToolSearchQuery>,
) -> Response {
    let query = query.q.as_deref().unwrap_or(DEFAULT_TOOL_SEARCH_QUERY);
    match state.workflow.search_tools(query).await {
        Ok(tools) => relay_success_response(json!({ "tools": tools })),
        Err(error) => workflow_error_response("search tools", &error),
    }
}

pub(super) async fn handle_tool_detail(
    State(state): State<Arc<AmrRelayState>>,
    Path(tool_id): Path<String>,
) -> Response {
    match state.workflow.tool_detail(&tool_id).await {
        Ok(tool) => relay_success_response(json!({ "tool": tool })),
        Err(error) => workflow_error_response("tool detail", &error),
    }
}

pub(super) async fn handle_not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "endpoint not found",
            "path": uri.path(),
        })),
    )
        .into_response()
}
