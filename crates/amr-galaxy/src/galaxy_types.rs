use serde_json::Value;

pub const DEFAULT_GALAXY_BASE_URL: &str = "https://usegalaxy.org";
pub const DEFAULT_GALAXY_REQUEST_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Connection settings for one Galaxy deployment.
pub struct GalaxyClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub request_timeout_ms: u64,
}

impl GalaxyClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            request_timeout_ms: DEFAULT_GALAXY_REQUEST_TIMEOUT_MS,
        }
    }

    /// Credential prefix that is safe to print in startup logs.
    pub fn masked_api_key(&self) -> String {
        let trimmed = self.api_key.trim();
        let prefix: String = trimmed.chars().take(4).collect();
        format!("{prefix}...")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// HTTP methods the relay issues against Galaxy.
pub enum GalaxyMethod {
    Get,
    Post,
}

impl GalaxyMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One call against the Galaxy API, relative to `{base_url}/api`.
pub struct GalaxyRequest {
    pub method: GalaxyMethod,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl GalaxyRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: GalaxyMethod::Get,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            method: GalaxyMethod::Post,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: Some(body),
            headers: Vec::new(),
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Adds a header that overrides any default header with the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn accept_text(self) -> Self {
        self.with_header("accept", "text/plain")
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Parsed Galaxy response body.
pub enum GalaxyResponse {
    Json(Value),
    Text(String),
}

impl GalaxyResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Converts the body into a JSON value, wrapping text bodies as JSON strings.
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }

    /// Returns the body as text; JSON bodies are serialized compactly.
    pub fn into_text(self) -> String {
        match self {
            Self::Json(Value::String(text)) => text,
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }
}
