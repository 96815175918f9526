use std::fmt;

use url::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "https://api.sourcecraft.tech";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "SRC_API_URL";

/// Environment variable holding the personal access token.
pub const TOKEN_ENV: &str = "SRC_TOKEN";

/// Where to send requests and how to authenticate them.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL with scheme and without trailing slash, e.g. `https://api.example.com`.
    pub base_url: Url,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn parse(base_url: &str, token: Option<String>) -> Result<Self> {
        let invalid = |reason: &str| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(base_url.trim()).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("expected http:// or https://"));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host"));
        }

        Ok(Self {
            base_url: strip_trailing_slash(url).map_err(|e| invalid(&e.to_string()))?,
            token: token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        })
    }

    /// `SRC_API_URL` (default [`DEFAULT_API_URL`]) and `SRC_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token = std::env::var(TOKEN_ENV).ok();
        Self::parse(&base_url, token)
    }

    /// Same token, different base URL.
    pub fn with_base_url(self, base_url: &str) -> Result<Self> {
        Self::parse(base_url, self.token)
    }

    /// Absolute URL for an API path such as `/repos/acme/widgets`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn strip_trailing_slash(url: Url) -> std::result::Result<Url, url::ParseError> {
    let s = url.as_str();
    if s.ends_with('/') {
        Url::parse(s.trim_end_matches('/'))
    } else {
        Ok(url)
    }
}
