use crate::lifecycle::MappingLifecycle;
use crate::outcome::{CreateOutcome, ResolveOutcome};
use crate::settings::LifecycleSettings;
use async_trait::async_trait;
use burrow_core::validation::validate_url;
use burrow_core::{Backend, Clock, ShortUrlId, StoredRecord, SystemClock, ValidationError};
use tracing::{debug, error, info, warn};

/// A concrete implementation of [`MappingLifecycle`] over any [`Backend`].
///
/// Holds no per-request state. Concurrent creates of the same URL are not
/// coordinated; both may write, and the backend's last write wins with
/// equivalent content.
#[derive(Debug)]
pub struct MappingManager<B, C = SystemClock> {
    backend: B,
    clock: C,
    settings: LifecycleSettings,
}

impl<B: Backend> MappingManager<B> {
    /// Creates a manager that judges expiry by the system clock.
    pub fn new(backend: B, settings: LifecycleSettings) -> Self {
        Self::with_clock(backend, SystemClock, settings)
    }
}

impl<B: Backend, C: Clock> MappingManager<B, C> {
    pub fn with_clock(backend: B, clock: C, settings: LifecycleSettings) -> Self {
        Self {
            backend,
            clock,
            settings,
        }
    }

    /// Returns a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    /// Unreadable `createdAt` or TTL counts as expired, so such records get
    /// rewritten instead of served.
    fn is_expired(&self, record: &StoredRecord) -> bool {
        match record.decode() {
            Ok(decoded) => decoded.is_expired(self.clock.now()),
            Err(e) => {
                warn!(
                    id = %record.short_url_id,
                    error = %e,
                    "stored record has unreadable expiry fields, treating it as expired"
                );
                true
            }
        }
    }

    fn validate(&self, request_path: &str, original_url: &str) -> Result<(), ValidationError> {
        if request_path != self.settings.creation_path {
            return Err(ValidationError::UnexpectedPath(request_path.to_string()));
        }
        validate_url(original_url)?;
        Ok(())
    }
}

#[async_trait]
impl<B: Backend, C: Clock> MappingLifecycle for MappingManager<B, C> {
    async fn create(&self, request_path: &str, original_url: &str) -> CreateOutcome {
        if let Err(e) = self.validate(request_path, original_url) {
            info!(
                path = %request_path,
                original_url = %original_url,
                reason = %e,
                "rejecting create request"
            );
            return CreateOutcome::Invalid(e);
        }

        let id = ShortUrlId::derive(original_url);
        debug!(id = %id, original_url = %original_url, "derived short url id");

        let existing = match self.backend.get(&id).await {
            Ok(existing) => existing,
            Err(e) => {
                error!(id = %id, error = %e, "failed to look up short url");
                return CreateOutcome::BackendReadFailure(e);
            }
        };

        if let Some(record) = existing {
            if !self.is_expired(&record) {
                info!(id = %id, original_url = %original_url, "reusing live short url");
                return CreateOutcome::Reused(id);
            }
            debug!(id = %id, "existing short url has expired, replacing it");
        }

        match self
            .backend
            .put(&id, original_url, self.settings.ttl_seconds)
            .await
        {
            Ok(()) => {
                info!(
                    id = %id,
                    original_url = %original_url,
                    ttl_seconds = self.settings.ttl_seconds,
                    "stored short url"
                );
                CreateOutcome::Created(id)
            }
            Err(e) => {
                error!(id = %id, error = %e, "failed to store short url");
                CreateOutcome::BackendWriteFailure(e)
            }
        }
    }

    async fn resolve(&self, id: &ShortUrlId) -> ResolveOutcome {
        let record = match self.backend.get(id).await {
            Ok(record) => record,
            Err(e) => {
                error!(id = %id, error = %e, "failed to look up short url");
                return ResolveOutcome::Failure(e);
            }
        };

        let Some(record) = record else {
            info!(id = %id, "short url not found");
            return ResolveOutcome::NotFound(id.clone());
        };

        if self.is_expired(&record) {
            info!(id = %id, created_at = %record.created_at, "short url has expired");
            return ResolveOutcome::Expired(id.clone());
        }

        debug!(id = %id, original_url = %record.original_url, "resolved short url");
        ResolveOutcome::Found {
            id: id.clone(),
            original_url: record.original_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::backend::Result as BackendResult;
    use burrow_core::{ManualClock, StorageError};
    use burrow_storage::InMemoryBackend;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    const THREE_DAYS: u64 = 259_200;
    const URL: &str = "https://example.com/a";

    /// In-memory backend that counts calls and can be told to fail.
    #[derive(Debug)]
    struct ScriptedBackend {
        inner: InMemoryBackend<ManualClock>,
        gets: AtomicUsize,
        puts: AtomicUsize,
        fail_get: AtomicBool,
        fail_put: AtomicBool,
    }

    impl ScriptedBackend {
        fn new(clock: ManualClock) -> Self {
            Self {
                inner: InMemoryBackend::with_clock(clock),
                gets: AtomicUsize::new(0),
                puts: AtomicUsize::new(0),
                fail_get: AtomicBool::new(false),
                fail_put: AtomicBool::new(false),
            }
        }

        fn gets(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }

        fn puts(&self) -> usize {
            self.puts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Backend for ScriptedBackend {
        async fn get(&self, id: &ShortUrlId) -> BackendResult<Option<StoredRecord>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("scripted read failure".into()));
            }
            self.inner.get(id).await
        }

        async fn put(&self, id: &ShortUrlId, original_url: &str, ttl_seconds: u64) -> BackendResult<()> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            if self.fail_put.load(Ordering::SeqCst) {
                return Err(StorageError::Timeout("scripted write failure".into()));
            }
            self.inner.put(id, original_url, ttl_seconds).await
        }
    }

    fn start() -> Timestamp {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    fn test_manager() -> (MappingManager<ScriptedBackend, ManualClock>, ManualClock) {
        let clock = ManualClock::new(start());
        let backend = ScriptedBackend::new(clock.clone());
        let manager = MappingManager::with_clock(backend, clock.clone(), LifecycleSettings::default());
        (manager, clock)
    }

    fn seed(manager: &MappingManager<ScriptedBackend, ManualClock>, created_at: &str, ttl: &str) -> ShortUrlId {
        let id = ShortUrlId::derive(URL);
        manager.backend().inner.insert_raw(StoredRecord {
            short_url_id: id.as_str().to_string(),
            original_url: URL.to_string(),
            created_at: created_at.to_string(),
            ttl_seconds: ttl.to_string(),
        });
        id
    }

    #[tokio::test]
    async fn create_writes_new_record() {
        let (manager, _clock) = test_manager();

        let outcome = manager.create("/", URL).await;

        let CreateOutcome::Created(id) = outcome else {
            panic!("expected Created, got {outcome:?}");
        };
        assert_eq!(id, ShortUrlId::derive(URL));
        assert_eq!(manager.backend().gets(), 1);
        assert_eq!(manager.backend().puts(), 1);

        let stored = manager.backend().inner.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.original_url, URL);
        assert_eq!(stored.ttl_seconds, THREE_DAYS.to_string());
        assert_eq!(stored.created_at, start().to_string());
    }

    #[tokio::test]
    async fn second_create_reuses_without_writing() {
        let (manager, _clock) = test_manager();

        let first = manager.create("/", URL).await;
        let second = manager.create("/", URL).await;

        assert!(matches!(first, CreateOutcome::Created(_)));
        let CreateOutcome::Reused(id) = second else {
            panic!("expected Reused, got {second:?}");
        };
        assert_eq!(Some(&id), first.short_url_id());
        assert_eq!(manager.backend().puts(), 1);
    }

    #[tokio::test]
    async fn create_replaces_expired_record() {
        let (manager, clock) = test_manager();
        manager.create("/", URL).await;

        clock.advance(SignedDuration::from_hours(96));
        let outcome = manager.create("/", URL).await;

        assert!(matches!(outcome, CreateOutcome::Created(_)));
        assert_eq!(manager.backend().puts(), 2);
        let stored = manager
            .backend()
            .inner
            .get(&ShortUrlId::derive(URL))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            stored.created_at,
            (start() + SignedDuration::from_hours(96)).to_string()
        );
    }

    #[tokio::test]
    async fn create_reuses_record_at_expiry_instant() {
        let (manager, clock) = test_manager();
        manager.create("/", URL).await;

        clock.advance(SignedDuration::from_secs(THREE_DAYS as i64));

        assert!(matches!(manager.create("/", URL).await, CreateOutcome::Reused(_)));
        assert_eq!(manager.backend().puts(), 1);
    }

    #[tokio::test]
    async fn create_overwrites_record_with_malformed_expiry() {
        let (manager, _clock) = test_manager();
        seed(&manager, "garbage", "259200");

        assert!(matches!(manager.create("/", URL).await, CreateOutcome::Created(_)));
        assert_eq!(manager.backend().puts(), 1);

        let (manager, _clock) = test_manager();
        seed(&manager, &start().to_string(), "three days");

        assert!(matches!(manager.create("/", URL).await, CreateOutcome::Created(_)));
        assert_eq!(manager.backend().puts(), 1);
    }

    #[tokio::test]
    async fn create_rejects_invalid_url_without_backend_calls() {
        let (manager, _clock) = test_manager();

        for url in [
            "not-a-url",
            "",
            "   ",
            "ftp://example.com",
            " https://example.com",
            "https://example.com/a\nb",
            "https://example.com/a\tb",
        ] {
            let outcome = manager.create("/", url).await;
            assert!(
                matches!(outcome, CreateOutcome::Invalid(_)),
                "{url:?} should be invalid, got {outcome:?}"
            );
        }

        assert_eq!(manager.backend().gets(), 0);
        assert_eq!(manager.backend().puts(), 0);
    }

    #[tokio::test]
    async fn create_rejects_wrong_path_without_backend_calls() {
        let (manager, _clock) = test_manager();

        let outcome = manager.create("/other", URL).await;

        assert!(matches!(
            outcome,
            CreateOutcome::Invalid(ValidationError::UnexpectedPath(ref path)) if path == "/other"
        ));
        assert_eq!(manager.backend().gets(), 0);
        assert_eq!(manager.backend().puts(), 0);
    }

    #[tokio::test]
    async fn create_honours_configured_path_and_ttl() {
        let clock = ManualClock::new(start());
        let settings = LifecycleSettings::builder()
            .ttl_seconds(60)
            .creation_path("/shorten")
            .build();
        let manager = MappingManager::with_clock(ScriptedBackend::new(clock.clone()), clock, settings);

        assert!(matches!(manager.create("/", URL).await, CreateOutcome::Invalid(_)));

        let CreateOutcome::Created(id) = manager.create("/shorten", URL).await else {
            panic!("expected Created");
        };
        let stored = manager.backend().inner.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.ttl_seconds, "60");
    }

    #[tokio::test]
    async fn create_read_failure_skips_write() {
        let (manager, _clock) = test_manager();
        manager.backend().fail_get.store(true, Ordering::SeqCst);

        let outcome = manager.create("/", URL).await;

        assert!(matches!(
            outcome,
            CreateOutcome::BackendReadFailure(StorageError::Unavailable(_))
        ));
        assert_eq!(manager.backend().puts(), 0);
    }

    #[tokio::test]
    async fn create_write_failure_is_reported() {
        let (manager, _clock) = test_manager();
        manager.backend().fail_put.store(true, Ordering::SeqCst);

        let outcome = manager.create("/", URL).await;

        assert!(matches!(
            outcome,
            CreateOutcome::BackendWriteFailure(StorageError::Timeout(_))
        ));
        assert!(outcome.short_url_id().is_none());
        assert_eq!(manager.backend().puts(), 1);
    }

    #[tokio::test]
    async fn resolve_live_record() {
        let (manager, _clock) = test_manager();
        let id = seed(&manager, &start().to_string(), "259200");

        let outcome = manager.resolve(&id).await;

        let ResolveOutcome::Found { id: found, original_url } = outcome else {
            panic!("expected Found, got {outcome:?}");
        };
        assert_eq!(found, id);
        assert_eq!(original_url, URL);
    }

    #[tokio::test]
    async fn resolve_expired_record() {
        let (manager, _clock) = test_manager();
        let four_days_ago = start() - SignedDuration::from_hours(96);
        let id = seed(&manager, &four_days_ago.to_string(), "259200");

        assert!(matches!(manager.resolve(&id).await, ResolveOutcome::Expired(ref e) if *e == id));
    }

    #[tokio::test]
    async fn resolve_malformed_record_reads_as_expired() {
        let (manager, _clock) = test_manager();
        let id = seed(&manager, "2025-06-01 noonish", "259200");

        assert!(matches!(manager.resolve(&id).await, ResolveOutcome::Expired(_)));
    }

    #[tokio::test]
    async fn resolve_missing_record() {
        let (manager, _clock) = test_manager();
        let id = ShortUrlId::from_request("nonexistent-id");

        assert!(matches!(manager.resolve(&id).await, ResolveOutcome::NotFound(ref n) if *n == id));
        assert_eq!(manager.backend().gets(), 1);
    }

    #[tokio::test]
    async fn resolve_read_failure() {
        let (manager, _clock) = test_manager();
        manager.backend().fail_get.store(true, Ordering::SeqCst);

        let outcome = manager.resolve(&ShortUrlId::derive(URL)).await;

        assert!(matches!(outcome, ResolveOutcome::Failure(_)));
        assert_eq!(outcome.kind(), "failure");
    }

    #[tokio::test]
    async fn create_then_resolve_round_trip() {
        let manager = MappingManager::new(InMemoryBackend::new(), LifecycleSettings::default());

        let outcome = manager.create("/", URL).await;
        let id = outcome.short_url_id().cloned().unwrap();

        assert!(matches!(
            manager.resolve(&id).await,
            ResolveOutcome::Found { ref original_url, .. } if original_url == URL
        ));
    }
}
