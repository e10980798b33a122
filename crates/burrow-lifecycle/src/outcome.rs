use burrow_core::{ShortUrlId, StorageError, ValidationError};

/// Terminal result of a create request.
#[derive(Debug, Clone)]
pub enum CreateOutcome {
    /// Bad URL or wrong request path. The backend was not touched.
    Invalid(ValidationError),
    /// The lookup failed. Nothing was written.
    BackendReadFailure(StorageError),
    /// A live record already maps this URL. Nothing was written.
    Reused(ShortUrlId),
    /// A new record was written, replacing an expired one if any.
    Created(ShortUrlId),
    /// The write failed after deciding to create.
    BackendWriteFailure(StorageError),
}

impl CreateOutcome {
    /// The short URL id handed back to the caller, if any.
    pub fn short_url_id(&self) -> Option<&ShortUrlId> {
        match self {
            CreateOutcome::Reused(id) | CreateOutcome::Created(id) => Some(id),
            _ => None,
        }
    }

    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CreateOutcome::Invalid(_) => "invalid",
            CreateOutcome::BackendReadFailure(_) => "backend_read_failure",
            CreateOutcome::Reused(_) => "reused",
            CreateOutcome::Created(_) => "created",
            CreateOutcome::BackendWriteFailure(_) => "backend_write_failure",
        }
    }
}

/// Terminal result of a redirect lookup.
#[derive(Debug, Clone)]
pub enum ResolveOutcome {
    /// A live record exists; redirect to `original_url`.
    Found { id: ShortUrlId, original_url: String },
    /// A record exists but is past its TTL.
    Expired(ShortUrlId),
    /// Nothing is stored under the id.
    NotFound(ShortUrlId),
    /// The lookup failed.
    Failure(StorageError),
}

impl ResolveOutcome {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveOutcome::Found { .. } => "found",
            ResolveOutcome::Expired(_) => "expired",
            ResolveOutcome::NotFound(_) => "not_found",
            ResolveOutcome::Failure(_) => "failure",
        }
    }
}
