use axum::extract::multipart::MultipartRejection;

use super::*;

pub(super) async fn handle_upload(
    State(state): State<Arc<AmrRelayState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            return relay_error_response(
                StatusCode::BAD_REQUEST,
                "validation_error",
                &rejection.body_text(),
            );
        }
    };

    let (file_name, file_bytes) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return relay_error_response(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    "no file was uploaded",
                );
            }
            Err(error) => {
                tracing::info!(error = %error, "rejected malformed upload body");
                return relay_error_response(error.status(), "validation_error", &error.body_text());
            }
        };
        if field.name() != Some(UPLOAD_FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => break (file_name, bytes),
            Err(error) => {
                tracing::info!(file_name = file_name.as_str(), error = %error, "rejected upload body");
                return relay_error_response(error.status(), "validation_error", &error.body_text());
            }
        }
    };

    match state.workflow.upload(&file_bytes, &file_name).await {
        Ok(uploaded) => relay_success_response(json!({
            "dataset_id": uploaded.dataset_id,
            "dataset_name": uploaded.dataset_name,
            "history_id": uploaded.history_id,
            "upload_info": uploaded.upload_info,
        })),
        Err(error) => workflow_error_response("upload", &error),
    }
}
