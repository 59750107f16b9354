/// Unified error types for handle resolution
use thiserror::Error;

/// Main error type for handle resolution
#[derive(Error, Debug)]
pub enum HandleError {
    /// Payload could not be converted to a structured mapping, or a
    /// selected field value is missing or not representable as text
    #[error("Invalid input parameter: {0}")]
    InvalidInput(String),

    /// Required input is absent (schema version missing or the literal "null")
    #[error("Missing input parameter: {0}")]
    MissingInput(String),

    /// Schema fetch or parse failed; not retried at this layer
    #[error("Schema retrieve error: {0}")]
    SchemaRetrieve(String),

    /// Salt table lookup or decode failed
    #[error("Salt store error: {0}")]
    SaltStore(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for handle resolution operations
pub type HandleResult<T> = Result<T, HandleError>;
