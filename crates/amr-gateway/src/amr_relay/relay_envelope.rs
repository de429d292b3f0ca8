//! Uniform `{success, ...}` response envelopes.

use super::*;

pub(super) fn relay_success_response(mut body: Value) -> Response {
    if let Value::Object(fields) = &mut body {
        fields.insert("success".to_string(), Value::Bool(true));
    }
    (StatusCode::OK, Json(body)).into_response()
}

pub(super) fn relay_error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "code": code,
            "error": message,
        })),
    )
        .into_response()
}

pub(super) fn workflow_error_response(operation: &str, error: &AmrWorkflowError) -> Response {
    let status = workflow_error_status(error);
    if error.is_validation() {
        tracing::info!(operation, error = %error, "relay request rejected");
    } else {
        tracing::warn!(
            operation,
            code = error.code(),
            error = %error,
            "relay operation failed"
        );
    }
    relay_error_response(status, error.code(), &error.to_string())
}

fn workflow_error_status(error: &AmrWorkflowError) -> StatusCode {
    if error.is_validation() {
        StatusCode::BAD_REQUEST
    } else if error.is_timeout() {
        StatusCode::GATEWAY_TIMEOUT
    } else {
        StatusCode::BAD_GATEWAY
    }
}
