//! Error types for the Koi & Fox client

use thiserror::Error;

/// Result type for client operations
pub type KoiFoxResult<T> = Result<T, KoiFoxError>;

/// Errors raised while talking to the backend, the clipboard or the config file
#[derive(Error, Debug, Clone)]
pub enum KoiFoxError {
    #[error("{message}")]
    Transport { message: String },

    #[error("backend returned {status}")]
    Status { status: u16, body: String },

    #[error("invalid response from backend: {details}")]
    Decode { details: String },

    #[error("clipboard error: {message}")]
    Clipboard { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Local checks that stop an analysis before any request is sent
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please paste conversation context and write a draft.")]
    MissingInput,

    #[error("Complete the wizard (Step 1 goal is required).")]
    IncompleteGoal,
}

impl KoiFoxError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        KoiFoxError::Transport {
            message: message.into(),
        }
    }

    /// Create a non-success status error carrying the raw response body
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        KoiFoxError::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(details: impl Into<String>) -> Self {
        KoiFoxError::Decode {
            details: details.into(),
        }
    }

    /// Create a clipboard error
    pub fn clipboard(message: impl Into<String>) -> Self {
        KoiFoxError::Clipboard {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        KoiFoxError::Config {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for KoiFoxError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            KoiFoxError::decode(error.to_string())
        } else {
            KoiFoxError::transport(error.to_string())
        }
    }
}

impl From<std::io::Error> for KoiFoxError {
    fn from(error: std::io::Error) -> Self {
        KoiFoxError::Io {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for KoiFoxError {
    fn from(error: toml::de::Error) -> Self {
        KoiFoxError::config(error.to_string())
    }
}

impl From<toml::ser::Error> for KoiFoxError {
    fn from(error: toml::ser::Error) -> Self {
        KoiFoxError::config(error.to_string())
    }
}
