use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub sponsorship: SponsorshipConfig,
    pub pgtune: PgtuneConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// How the application form prices a selection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostResolutionMode {
    /// Prices come from the catalog itself.
    #[default]
    Static,
    /// Prices come from the cost endpoint.
    Remote,
}

/// Sponsorship application form settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SponsorshipConfig {
    /// JSON catalog document with packages and benefits.
    pub catalog: Option<PathBuf>,
    pub cost_resolution: CostResolutionMode,
    /// Absolute URL of the cost endpoint, used when `cost_resolution = "remote"`.
    pub cost_endpoint: Option<String>,
    pub cost_timeout_seconds: u64,
    pub desktop_width_limit: u32,
}

/// Defaults for the PostgreSQL tuning calculator.
///
/// Values are kept as the raw strings the provisioning layer hands over
/// (`"mixed"`, `"49416564kB"`, `"x86_64"`); the tuning slice validates them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PgtuneConfig {
    pub db_type: String,
    pub max_connections: Option<String>,
    pub total_memory: Option<String>,
    pub machine: String,
    pub version: String,
}

/// Log output of the binaries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (`info`, `debug`, ...); `RUST_LOG` still wins.
    pub level: String,
    /// Directory for daily rolling log files; console only when unset.
    pub path: Option<PathBuf>,
    pub max_files: usize,
    pub json: bool,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8000, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for SponsorshipConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            cost_resolution: CostResolutionMode::Static,
            cost_endpoint: None,
            cost_timeout_seconds: 10,
            desktop_width_limit: crate::constants::DESKTOP_WIDTH_LIMIT,
        }
    }
}

impl Default for PgtuneConfig {
    fn default() -> Self {
        Self {
            db_type: "mixed".to_owned(),
            max_connections: None,
            total_memory: None,
            machine: "x86_64".to_owned(),
            version: "9.3".to_owned(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), path: None, max_files: 10, json: false }
    }
}
