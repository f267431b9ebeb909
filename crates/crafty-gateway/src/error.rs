//! Error types for remote calls

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Failed to reach crafty server: {0}")]
    Connection(String),

    #[error("Server returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Message carried in the `{error}` field of a response envelope
    #[error("{0}")]
    Server(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out")]
    Timeout,
}

impl GatewayError {
    /// Message suitable for an inline error list.
    ///
    /// Server-reported errors are shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Connection(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
