use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Response body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Message the backend attached to a failed response, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Request(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(err) => err.status().map(|status| status.as_u16()),
            ApiError::Decode(_) => None,
        }
    }

    /// Text for a notice: the backend's message, else `fallback`.
    pub fn notice_text(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }
}

/// Extracts `error.message` from an error response body.
pub fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}
