use thiserror::Error;

#[derive(Error, Debug)]
pub enum PusherError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration source error: {0}")]
    Source(#[from] ::config::ConfigError),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl PusherError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Failure to get a response out of the HTTP transport at all.
///
/// Anything the backend actually answered, whatever the status, is not a
/// transport error.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("request to {url} failed: {message}")]
    Other { url: String, message: String },
}

impl TransportError {
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url } | Self::Connect { url, .. } | Self::Other { url, .. } => url,
        }
    }
}
