// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid bookmark id: {0}")]
    InvalidId(String),

    #[error("Other error: {0}")]
    Other(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::Network(msg) => {
                DomainError::Network(format!("{}: {}", context.into(), msg))
            }
            DomainError::MalformedResponse(msg) => {
                DomainError::MalformedResponse(format!("{}: {}", context.into(), msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context.into(), msg)),
            // status and body are reported verbatim
            err => err,
        }
    }

    /// True for failures where the service was never reached or its answer was unusable.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::Network(_) | DomainError::MalformedResponse(_)
        )
    }

    /// Message carried by an error body of the form `{"error": "..."}`, if any.
    pub fn server_message(&self) -> Option<String> {
        match self {
            DomainError::Server { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string)),
            _ => None,
        }
    }
}
