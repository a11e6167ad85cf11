use thiserror::Error;

/// Failures of a single service call. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("invalid service url {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("could not start network runtime: {0}")]
    Runtime(String),
    #[error("{0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("Upload failed: {body}")]
    UploadRejected { status: u16, body: String },
    #[error("Search failed")]
    SearchRejected { status: u16 },
    #[error("status request failed with HTTP {status}")]
    StatusRejected { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("could not read {path}: {message}")]
    ReadFile { path: String, message: String },
}

impl ClientError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ClientError::Timeout;
        }
        ClientError::Network(err.to_string())
    }
}
