use crate::error::ValidationError;
use url::Url;

/// Checks that `original_url` is something worth shortening.
///
/// Accepted URLs are absolute `http`/`https` URLs with a host and no
/// whitespace or control characters anywhere. The string is not normalized:
/// the identifier is later derived from exactly the accepted input.
pub fn validate_url(original_url: &str) -> Result<Url, ValidationError> {
    if original_url.trim().is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if original_url.trim() != original_url {
        return Err(ValidationError::SurroundingWhitespace);
    }
    // Url::parse strips tabs and newlines silently
    if original_url
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ValidationError::ControlCharacter);
    }

    let url = Url::parse(original_url).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ValidationError::UnsupportedScheme(other.to_string())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(ValidationError::MissingHost),
    }

    Ok(url)
}
