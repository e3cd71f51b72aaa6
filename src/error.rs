use thiserror::Error;

pub type Result<T> = std::result::Result<T, FaultwallError>;

#[derive(Debug, Error)]
pub enum FaultwallError {
    #[error("Failed to serialize error response: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

impl FaultwallError {
    /// Create an invalid configuration error
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }
}
