use typed_builder::TypedBuilder;

/// Three days.
pub const DEFAULT_TTL_SECONDS: u64 = 259_200;

pub const DEFAULT_CREATION_PATH: &str = "/";

/// Per-deployment knobs of the lifecycle manager.
#[derive(Debug, Clone, TypedBuilder)]
pub struct LifecycleSettings {
    /// Validity window written with every new record.
    #[builder(default = DEFAULT_TTL_SECONDS)]
    pub ttl_seconds: u64,
    /// The only request path on which create requests are accepted.
    #[builder(default = DEFAULT_CREATION_PATH.to_string(), setter(into))]
    pub creation_path: String,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
