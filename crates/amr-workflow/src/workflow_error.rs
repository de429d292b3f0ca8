use amr_galaxy::GalaxyError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates failures of the upload, invocation and status operations.
pub enum AmrWorkflowError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Remote(#[from] GalaxyError),
    #[error("unrecognized galaxy upload response: {body}")]
    UnrecognizedUploadResponse { body: String },
    #[error("all {attempts} amrfinder tool candidates failed; last error: {last_error}")]
    AllToolCandidatesFailed {
        attempts: usize,
        #[source]
        last_error: GalaxyError,
    },
    #[error("galaxy accepted tool '{tool_id}' but returned no jobs")]
    EmptyJobList { tool_id: String },
    #[error("unexpected galaxy {operation} response: {detail}")]
    UnexpectedResponse {
        operation: &'static str,
        detail: String,
    },
}

impl AmrWorkflowError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn unexpected(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            operation,
            detail: detail.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Remote(GalaxyError::Api { .. }) => "remote_api_error",
            Self::Remote(GalaxyError::Timeout { .. }) => "remote_timeout",
            Self::Remote(_) => "remote_request_failed",
            Self::UnrecognizedUploadResponse { .. } => "unrecognized_upload_response",
            Self::AllToolCandidatesFailed { .. } => "all_tool_candidates_failed",
            Self::EmptyJobList { .. } => "empty_job_list",
            Self::UnexpectedResponse { .. } => "unexpected_remote_response",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Remote(error) if error.is_timeout())
    }
}
