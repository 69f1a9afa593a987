use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "PSF";

#[psf_derive::psf_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file and overlays environment variables.
///
/// 1. **Base file**: `path` (any format the `config` crate recognises by extension, or
///    extension-less lookup). Defaults to `config/server` when `None` is passed; the
///    default file is optional, an explicit path is required.
/// 2. **Environment**: variables prefixed with `PSF__`, nested with double underscores
///    (`PSF__SERVER__PORT=9000` maps to `server.port`).
///
/// # Errors
/// Returns an error when an explicit file is missing or when the merged sources
/// do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use psf_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from("config/server"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
