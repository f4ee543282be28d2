use thiserror::Error;

/// Failure outcomes of the client's network and DOM call sites.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("network request failed: {0}")]
    Network(String),

    /// The request was cancelled before a response arrived (timeout or explicit cancel).
    #[error("request aborted")]
    Aborted,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("could not decode match state: {0}")]
    Decode(String),

    #[error("DOM unavailable: {0}")]
    Dom(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
