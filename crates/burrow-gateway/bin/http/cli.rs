use burrow_lifecycle::{DEFAULT_CREATION_PATH, DEFAULT_TTL_SECONDS};
use burrow_storage::redis::DEFAULT_KEY_PREFIX;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "BURROW_GATEWAY_LISTEN_ADDR";
pub const TTL_SECONDS_ENV: &str = "BURROW_TTL_SECONDS";
pub const CREATION_PATH_ENV: &str = "BURROW_CREATION_PATH";
pub const STORAGE_BACKEND_ENV: &str = "BURROW_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "BURROW_MYSQL_DSN";
pub const MYSQL_BOOTSTRAP_SCHEMA_ENV: &str = "BURROW_MYSQL_BOOTSTRAP_SCHEMA";
pub const REDIS_URL_ENV: &str = "BURROW_REDIS_URL";
pub const REDIS_KEY_PREFIX_ENV: &str = "BURROW_REDIS_KEY_PREFIX";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "BURROW_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "burrow-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Validity window of newly created short URLs.
    #[arg(long, env = TTL_SECONDS_ENV, default_value_t = DEFAULT_TTL_SECONDS)]
    pub ttl_seconds: u64,

    /// Request path on which create requests are accepted.
    #[arg(long, env = CREATION_PATH_ENV, default_value = DEFAULT_CREATION_PATH)]
    pub creation_path: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    /// Create the `short_urls` table on start-up if it is missing.
    #[arg(long, env = MYSQL_BOOTSTRAP_SCHEMA_ENV)]
    pub mysql_bootstrap_schema: bool,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    #[arg(long, env = REDIS_KEY_PREFIX_ENV, default_value = DEFAULT_KEY_PREFIX)]
    pub redis_key_prefix: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP gRPC collector, e.g. `http://localhost:4317`. Span export is off
    /// when unset.
    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}
