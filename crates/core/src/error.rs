use thiserror::Error;

pub type ProDialerResult<T> = Result<T, ProDialerError>;

#[derive(Error, Debug)]
pub enum ProDialerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid contact record: {0}")]
    InvalidRecord(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for ProDialerError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
