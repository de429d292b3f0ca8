use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates failures raised while calling the Galaxy API.
pub enum GalaxyError {
    #[error("invalid galaxy client configuration: {0}")]
    InvalidConfig(String),
    #[error("galaxy api {method} {endpoint} failed with status {status}: {body}")]
    Api {
        method: &'static str,
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("galaxy api {method} {endpoint} timed out after {timeout_ms}ms")]
    Timeout {
        method: &'static str,
        endpoint: String,
        timeout_ms: u64,
    },
    #[error("galaxy api {method} {endpoint} request failed: {source}")]
    Transport {
        method: &'static str,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode galaxy api {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GalaxyError {
    /// HTTP status reported by Galaxy, when the failure came from a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_api_error_display_keeps_status_and_body_verbatim() {
        let error = GalaxyError::Api {
            method: "POST",
            endpoint: "/tools".to_string(),
            status: 400,
            body: r#"{"err_msg":"tool not found"}"#.to_string(),
        };
        assert_eq!(error.status(), Some(400));
        assert!(!error.is_timeout());
        assert_eq!(
            error.to_string(),
            r#"galaxy api POST /tools failed with status 400: {"err_msg":"tool not found"}"#
        );
    }

    #[test]
    fn unit_timeout_error_reports_deadline() {
        let error = GalaxyError::Timeout {
            method: "GET",
            endpoint: "/jobs/abc".to_string(),
            timeout_ms: 60_000,
        };
        assert!(error.is_timeout());
        assert_eq!(error.status(), None);
        assert!(error.to_string().contains("timed out after 60000ms"));
    }
}
