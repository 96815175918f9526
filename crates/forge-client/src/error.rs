use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("http.error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON decoding failed")]
    Json(#[from] serde_json::Error),

    #[error("invalid field {0:?} (expected key=value)")]
    InvalidField(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
