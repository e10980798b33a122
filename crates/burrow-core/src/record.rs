use crate::error::RecordError;
use crate::short_url_id::ShortUrlId;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// A short URL record in the form a backend persists it.
///
/// `created_at` (RFC 3339) and `ttl_seconds` (decimal) are kept textual so
/// that every backend hands back exactly what it stored; interpretation
/// happens in [`StoredRecord::decode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub short_url_id: String,
    pub original_url: String,
    pub created_at: String,
    #[serde(rename = "timeToLiveInSeconds")]
    pub ttl_seconds: String,
}

impl StoredRecord {
    /// Builds the stored form of a freshly written record.
    pub fn new(
        id: &ShortUrlId,
        original_url: impl Into<String>,
        created_at: Timestamp,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            short_url_id: id.as_str().to_owned(),
            original_url: original_url.into(),
            created_at: created_at.to_string(),
            ttl_seconds: ttl_seconds.to_string(),
        }
    }

    /// Interprets the expiry fields.
    ///
    /// Fails if `created_at` is not an RFC 3339 timestamp with an offset or
    /// if `ttl_seconds` is not a non-negative integer.
    pub fn decode(&self) -> Result<ShortUrlRecord, RecordError> {
        let created_at = self.created_at.parse::<Timestamp>().map_err(|e| {
            RecordError::MalformedCreatedAt {
                value: self.created_at.clone(),
                reason: e.to_string(),
            }
        })?;
        let ttl_seconds = self
            .ttl_seconds
            .trim()
            .parse::<u64>()
            .map_err(|_| RecordError::MalformedTtl(self.ttl_seconds.clone()))?;

        Ok(ShortUrlRecord {
            id: ShortUrlId::from_request(self.short_url_id.clone()),
            original_url: self.original_url.clone(),
            created_at,
            ttl_seconds,
        })
    }
}

/// A decoded short URL record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlRecord {
    pub id: ShortUrlId,
    pub original_url: String,
    pub created_at: Timestamp,
    pub ttl_seconds: u64,
}

impl ShortUrlRecord {
    /// The last instant at which the record is live.
    ///
    /// `None` when `created_at + ttl_seconds` lies beyond the representable
    /// time range, i.e. the record never expires.
    pub fn expires_at(&self) -> Option<Timestamp> {
        let ttl = i64::try_from(self.ttl_seconds).ok()?;
        self.created_at
            .checked_add(SignedDuration::from_secs(ttl))
            .ok()
    }

    /// A record is live while `now <= created_at + ttl_seconds`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at().is_some_and(|expires_at| now > expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_DAYS: u64 = 259_200;

    fn now() -> Timestamp {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    fn stored(created_at: &str, ttl: &str) -> StoredRecord {
        StoredRecord {
            short_url_id: "abc".to_string(),
            original_url: "https://example.com".to_string(),
            created_at: created_at.to_string(),
            ttl_seconds: ttl.to_string(),
        }
    }

    #[test]
    fn new_then_decode_keeps_fields() {
        let id = ShortUrlId::derive("https://example.com/a");
        let record = StoredRecord::new(&id, "https://example.com/a", now(), THREE_DAYS)
            .decode()
            .unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.original_url, "https://example.com/a");
        assert_eq!(record.created_at, now());
        assert_eq!(record.ttl_seconds, THREE_DAYS);
    }

    #[test]
    fn four_day_old_record_with_three_day_ttl_is_expired() {
        let created = now() - SignedDuration::from_hours(96);
        let record = StoredRecord::new(&ShortUrlId::derive("u"), "u", created, THREE_DAYS)
            .decode()
            .unwrap();

        assert!(record.is_expired(now()));
    }

    #[test]
    fn fresh_record_is_live() {
        let record = StoredRecord::new(&ShortUrlId::derive("u"), "u", now(), THREE_DAYS)
            .decode()
            .unwrap();

        assert!(!record.is_expired(now()));
    }

    #[test]
    fn record_is_live_at_exact_expiry_instant() {
        let record = StoredRecord::new(&ShortUrlId::derive("u"), "u", now(), 60)
            .decode()
            .unwrap();
        let deadline = now() + SignedDuration::from_secs(60);

        assert_eq!(record.expires_at(), Some(deadline));
        assert!(!record.is_expired(deadline));
        assert!(record.is_expired(deadline + SignedDuration::from_secs(1)));
    }

    #[test]
    fn zero_ttl_expires_after_creation_instant() {
        let record = StoredRecord::new(&ShortUrlId::derive("u"), "u", now(), 0)
            .decode()
            .unwrap();

        assert!(!record.is_expired(now()));
        assert!(record.is_expired(now() + SignedDuration::from_secs(1)));
    }

    #[test]
    fn huge_ttl_never_expires() {
        let record = stored("2025-06-01T12:00:00Z", &u64::MAX.to_string())
            .decode()
            .unwrap();

        assert_eq!(record.expires_at(), None);
        assert!(!record.is_expired(Timestamp::MAX));
    }

    #[test]
    fn accepts_offset_timestamps_with_fractional_seconds() {
        let record = stored("2025-06-01T12:00:00.123456+00:00", "10")
            .decode()
            .unwrap();

        assert_eq!(record.created_at.as_second(), now().as_second());
    }

    #[test]
    fn malformed_created_at_is_rejected() {
        let err = stored("yesterday", "10").decode().unwrap_err();
        assert!(matches!(err, RecordError::MalformedCreatedAt { .. }));

        // no offset, no way to place it on the timeline
        let err = stored("2025-06-01T12:00:00", "10").decode().unwrap_err();
        assert!(matches!(err, RecordError::MalformedCreatedAt { .. }));
    }

    #[test]
    fn non_numeric_or_negative_ttl_is_rejected() {
        for ttl in ["", "three days", "-5", "1.5"] {
            let err = stored("2025-06-01T12:00:00Z", ttl).decode().unwrap_err();
            assert_eq!(err, RecordError::MalformedTtl(ttl.to_string()));
        }
    }

    #[test]
    fn json_uses_stored_attribute_names() {
        let json = serde_json::to_value(stored("2025-06-01T12:00:00Z", "10")).unwrap();

        assert_eq!(json["shortUrlId"], "abc");
        assert_eq!(json["originalUrl"], "https://example.com");
        assert_eq!(json["createdAt"], "2025-06-01T12:00:00Z");
        assert_eq!(json["timeToLiveInSeconds"], "10");
    }
}
