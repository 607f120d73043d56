// src/application/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
        }
    }

    /// The underlying domain error, if this wraps one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ApplicationError::Domain(err) => Some(err),
            _ => None,
        }
    }
}

impl From<crate::infrastructure::error::InfrastructureError> for ApplicationError {
    fn from(err: crate::infrastructure::error::InfrastructureError) -> Self {
        ApplicationError::Domain(err.into())
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
