use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Job and dataset lifecycle state as reported by Galaxy.
///
/// `new`/`queued` → `running` → `ok` | `error`. Any other state string is kept
/// verbatim in `Other`.
pub enum RemoteState {
    New,
    Queued,
    Running,
    Ok,
    Error,
    Other(String),
}

impl RemoteState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "new" => Self::New,
            "queued" => Self::Queued,
            "running" => Self::Running,
            "ok" => Self::Ok,
            "error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }

    /// Reads the `state` field of a job or dataset descriptor.
    pub fn from_descriptor(descriptor: &Value) -> Option<Self> {
        descriptor
            .get("state")
            .and_then(Value::as_str)
            .map(Self::parse)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "new",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Ok => "ok",
            Self::Error => "error",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ok | Self::Error)
    }
}

impl From<String> for RemoteState {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RemoteState> for String {
    fn from(value: RemoteState) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for RemoteState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unit_only_ok_and_error_are_terminal() {
        for state in ["new", "queued", "running", "paused", "setting_metadata"] {
            assert!(!RemoteState::parse(state).is_terminal(), "{state}");
        }
        assert!(RemoteState::Ok.is_terminal());
        assert!(RemoteState::Error.is_terminal());
    }

    #[test]
    fn unit_unknown_states_pass_through_verbatim() {
        let state = RemoteState::parse("failed_metadata");
        assert_eq!(state, RemoteState::Other("failed_metadata".to_string()));
        assert_eq!(
            serde_json::to_value(&state).expect("serialize"),
            json!("failed_metadata")
        );
    }

    #[test]
    fn unit_from_descriptor_reads_state_field() {
        assert_eq!(
            RemoteState::from_descriptor(&json!({"id": "ds1", "state": "ok"})),
            Some(RemoteState::Ok)
        );
        assert_eq!(RemoteState::from_descriptor(&json!({"id": "ds1"})), None);
    }
}
