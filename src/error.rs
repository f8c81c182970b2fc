use std::error::Error as StdError;

use thiserror::Error;

/// Boxed cause carried by every error variant.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, PersistenceError>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No record exists for the requested identifier.
    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
    /// Malformed input: bad identifier, missing update target, invalid directory,
    /// or a decoded document that is not a mapping.
    #[error("{message}")]
    InvalidArgument {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
    /// The storage operation itself failed.
    #[error("{message}")]
    Runtime {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl PersistenceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        PersistenceError::NotFound {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        PersistenceError::InvalidArgument {
            message: message.into(),
            source: None,
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        PersistenceError::Runtime {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the originating error, replacing any previous cause.
    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        let slot = match &mut self {
            PersistenceError::NotFound { source, .. }
            | PersistenceError::InvalidArgument { source, .. }
            | PersistenceError::Runtime { source, .. } => source,
        };
        *slot = Some(cause.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistenceError::NotFound { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PersistenceError::InvalidArgument { .. })
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, PersistenceError::Runtime { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            PersistenceError::NotFound { message, .. }
            | PersistenceError::InvalidArgument { message, .. }
            | PersistenceError::Runtime { message, .. } => message,
        }
    }
}
