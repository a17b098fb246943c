//! Error types for term vector extraction.
//!
//! Every failure is terminal for the enclosing request. Errors carry an
//! [`ErrorCode`] so the request pipeline can decide how to report them:
//! caller mistakes (such as a malformed document id) are `BadRequest`,
//! everything that goes wrong while reading the index is `ServerError`.

use thiserror::Error;

/// Classification of an error at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The request itself was malformed.
    BadRequest,
    /// The server failed while serving a well-formed request.
    ServerError,
}

impl ErrorCode {
    /// HTTP-style status code for this classification.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::BadRequest => 400,
            ErrorCode::ServerError => 500,
        }
    }
}

/// Main error type for term vector operations.
#[derive(Error, Debug)]
pub enum TermVectorError {
    /// A request parameter could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading term vectors, stored fields or the term dictionary failed.
    #[error("Index error: {0}")]
    Index(String),

    /// A document has no value for the schema's unique key field.
    #[error("Document {doc_id} has no value for unique key field '{field}'")]
    MissingUniqueKey { doc_id: u64, field: String },

    /// A shard sub-request failed.
    #[error("Shard '{shard}' failed: {message}")]
    ShardFailure { shard: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for term vector operations.
pub type Result<T> = std::result::Result<T, TermVectorError>;

impl TermVectorError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TermVectorError::InvalidArgument(msg.into())
    }

    pub fn index(msg: impl Into<String>) -> Self {
        TermVectorError::Index(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        TermVectorError::InvalidConfig(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        TermVectorError::Internal(msg.into())
    }

    /// Classify this error for the request boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            TermVectorError::InvalidArgument(_) => ErrorCode::BadRequest,
            _ => ErrorCode::ServerError,
        }
    }

    /// Returns true if the caller's input caused this error.
    pub fn is_client_error(&self) -> bool {
        self.code() == ErrorCode::BadRequest
    }
}
