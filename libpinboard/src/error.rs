//! Error types for the Pinboard client core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PinboardError>;

#[derive(Error, Debug)]
pub enum PinboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PinboardError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PinboardError::InvalidInput(_) => 3,
            PinboardError::Api(ApiError::Unauthorized) => 2,
            PinboardError::Api(_) => 1,
            PinboardError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    WriteError(#[from] toml::ser::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Failures reported by the bookmark and note collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    Server(String),
}
