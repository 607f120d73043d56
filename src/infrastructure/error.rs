use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type InfrastructureResult<T> = Result<T, InfrastructureError>;

impl From<reqwest::Error> for InfrastructureError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            InfrastructureError::Serialization(error.to_string())
        } else {
            InfrastructureError::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for InfrastructureError {
    fn from(error: serde_json::Error) -> Self {
        InfrastructureError::Serialization(error.to_string())
    }
}

impl From<url::ParseError> for InfrastructureError {
    fn from(error: url::ParseError) -> Self {
        InfrastructureError::InvalidUrl(error.to_string())
    }
}

// Implement conversion from infrastructure errors to domain errors
impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Network(msg) => DomainError::Network(msg),
            InfrastructureError::Http { status, body } => DomainError::Server { status, body },
            InfrastructureError::Serialization(msg) => DomainError::MalformedResponse(msg),
            InfrastructureError::InvalidUrl(msg) => DomainError::Other(format!("Invalid URL: {}", msg)),
            InfrastructureError::Configuration(msg) => DomainError::Other(msg),
        }
    }
}
