use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::render::truncate;

/// Longest error body kept in [`ClientError::Status`], in characters.
const MAX_ERROR_BODY: usize = 1024;

#[derive(Debug, Clone)]
pub struct ForgeClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ForgeClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("srccli/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `body` (an empty object when `None`) as JSON and decode the JSON reply.
    ///
    /// Any non-2xx status becomes [`ClientError::Status`] carrying the response
    /// body, trimmed and cut to `MAX_ERROR_BODY` characters. An empty 2xx
    /// body decodes to `Value::Null`.
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.config.endpoint(path);
        let empty = Value::Object(Map::new());
        let body = body.unwrap_or(&empty);

        tracing::debug!(%method, %url, "sending request");
        let mut req = self.http.request(method, &url).json(body);
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "received response");

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate(text.trim(), MAX_ERROR_BODY),
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, None).await
    }
}
