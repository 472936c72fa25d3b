use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Ingest error: {0}")]
    Ingest(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<::config::ConfigError> for BenchError {
    fn from(err: ::config::ConfigError) -> Self {
        BenchError::Configuration(err.to_string())
    }
}

impl From<csv::Error> for BenchError {
    fn from(err: csv::Error) -> Self {
        BenchError::Ingest(err.to_string())
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::Ingest(err.to_string())
    }
}

impl From<tokio::task::JoinError> for BenchError {
    fn from(err: tokio::task::JoinError) -> Self {
        BenchError::Worker(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
