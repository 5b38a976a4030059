// Error types shared by the API client and the menu handlers.
// Every variant's Display text is the message shown to the user, so the UI
// can simply print the error and go back to the menu.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Internet connection problem")]
    Connection(#[source] reqwest::Error),

    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("HTTP error {0}")]
    Status(u16),

    #[error("Request failed")]
    Request(#[source] reqwest::Error),

    #[error("Unexpected response format: {message}")]
    Decode { message: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("No {service} API key found in environment variables.")]
    MissingApiKey { service: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode {
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Timeout first: a connect timeout reports both flags.
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else if err.is_connect() {
            ApiError::Connection(err)
        } else if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else {
            ApiError::Request(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
