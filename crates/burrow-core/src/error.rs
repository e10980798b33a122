use thiserror::Error;

/// Reasons a create request is rejected before any backend access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("url is empty")]
    EmptyUrl,
    #[error("url has leading or trailing whitespace")]
    SurroundingWhitespace,
    #[error("url contains whitespace or control characters")]
    ControlCharacter,
    #[error("url is malformed: {0}")]
    Malformed(String),
    #[error("url scheme must be http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("url has no host")]
    MissingHost,
    #[error("unexpected request path '{0}'")]
    UnexpectedPath(String),
}

/// Failures reported by a persistence backend.
///
/// `InvalidData` covers records that exist but cannot be decoded at all.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// A stored record whose expiry fields cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("malformed createdAt '{value}': {reason}")]
    MalformedCreatedAt { value: String, reason: String },
    #[error("malformed ttl '{0}'")]
    MalformedTtl(String),
}
