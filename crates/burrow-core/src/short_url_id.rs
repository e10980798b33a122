use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a shortened URL, used both as the storage key and as the
/// redirect path segment.
///
/// Identifiers produced by [`ShortUrlId::derive`] are 32 lowercase hex
/// characters. Identifiers taken from an incoming request path are kept
/// as-is; an unknown identifier simply resolves to nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortUrlId(String);

impl ShortUrlId {
    /// Derives the identifier for `original_url`.
    ///
    /// The identifier is the MD5 digest of the UTF-8 bytes of the input,
    /// rendered as lowercase hex. The same input always yields the same
    /// identifier. The input is not validated; any string, including the
    /// empty string, is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow_core::ShortUrlId;
    ///
    /// let a = ShortUrlId::derive("https://example.com/a");
    /// let b = ShortUrlId::derive("https://example.com/a");
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 32);
    /// ```
    pub fn derive(original_url: &str) -> Self {
        let digest = Md5::digest(original_url.as_bytes());
        Self(format!("{digest:x}"))
    }

    /// Wraps an identifier received from a caller, e.g. a redirect path.
    pub fn from_request(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShortUrlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
