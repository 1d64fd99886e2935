use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CartError {
    /// Whether the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, CartError::Network(_))
    }
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        CartError::Decode(err.to_string())
    }
}

pub type CartResult<T> = Result<T, CartError>;
