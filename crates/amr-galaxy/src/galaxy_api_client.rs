//! reqwest-backed Galaxy API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::{
    GalaxyClientConfig, GalaxyError, GalaxyMethod, GalaxyRequest, GalaxyResponse, GalaxyTransport,
};

const GALAXY_API_KEY_HEADER: &str = "x-api-key";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone)]
/// Galaxy REST client that authenticates every request with the configured API key.
pub struct GalaxyApiClient {
    http: reqwest::Client,
    api_root: String,
    api_key: HeaderValue,
    request_timeout_ms: u64,
}

impl GalaxyApiClient {
    pub fn new(config: &GalaxyClientConfig) -> Result<Self, GalaxyError> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(GalaxyError::InvalidConfig(
                "galaxy base url must be provided".to_string(),
            ));
        }
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(GalaxyError::InvalidConfig(
                "galaxy api key must be provided".to_string(),
            ));
        }
        let mut api_key = HeaderValue::from_str(api_key).map_err(|_| {
            GalaxyError::InvalidConfig("galaxy api key is not a valid header value".to_string())
        })?;
        api_key.set_sensitive(true);

        let request_timeout_ms = config.request_timeout_ms.max(1);
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms))
            .build()
            .map_err(|error| {
                GalaxyError::InvalidConfig(format!("failed to create galaxy api client: {error}"))
            })?;

        Ok(Self {
            http,
            api_root: format!("{base_url}/api"),
            api_key,
            request_timeout_ms,
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn request_headers(&self, overrides: &[(String, String)]) -> Result<HeaderMap, GalaxyError> {
        let mut headers = HeaderMap::new();
        headers.insert(GALAXY_API_KEY_HEADER, self.api_key.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        for (name, value) in overrides {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                GalaxyError::InvalidConfig(format!("invalid request header name '{name}'"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                GalaxyError::InvalidConfig(format!("invalid value for request header '{name}'"))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn transport_error(&self, request: &GalaxyRequest, error: reqwest::Error) -> GalaxyError {
        if error.is_timeout() {
            GalaxyError::Timeout {
                method: request.method.as_str(),
                endpoint: request.endpoint.clone(),
                timeout_ms: self.request_timeout_ms,
            }
        } else {
            GalaxyError::Transport {
                method: request.method.as_str(),
                endpoint: request.endpoint.clone(),
                source: error,
            }
        }
    }
}

#[async_trait]
impl GalaxyTransport for GalaxyApiClient {
    async fn call(&self, request: GalaxyRequest) -> Result<GalaxyResponse, GalaxyError> {
        let url = format!("{}{}", self.api_root, request.endpoint);
        tracing::debug!(
            method = request.method.as_str(),
            url = url.as_str(),
            "galaxy api request"
        );

        let headers = self.request_headers(&request.headers)?;
        let mut builder = match request.method {
            GalaxyMethod::Get => self.http.get(url.as_str()),
            GalaxyMethod::Post => self.http.post(url.as_str()),
        };
        builder = builder.headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.body(body.to_string());
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(error) => {
                let error = self.transport_error(&request, error);
                tracing::warn!(
                    method = request.method.as_str(),
                    endpoint = request.endpoint.as_str(),
                    error = %error,
                    "galaxy api request failed"
                );
                return Err(error);
            }
        };

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains(JSON_CONTENT_TYPE));
        let body = response
            .text()
            .await
            .map_err(|error| self.transport_error(&request, error))?;

        if !status.is_success() {
            tracing::warn!(
                method = request.method.as_str(),
                endpoint = request.endpoint.as_str(),
                status = status.as_u16(),
                "galaxy api returned non-success status"
            );
            return Err(GalaxyError::Api {
                method: request.method.as_str(),
                endpoint: request.endpoint,
                status: status.as_u16(),
                body,
            });
        }

        if is_json {
            let parsed = serde_json::from_str(&body).map_err(|source| GalaxyError::Decode {
                endpoint: request.endpoint.clone(),
                source,
            })?;
            Ok(GalaxyResponse::Json(parsed))
        } else {
            Ok(GalaxyResponse::Text(body))
        }
    }
}
