//! # Logger
//!
//! Installs the global `tracing` subscriber for the server and CLI binaries.
//!
//! * Console output goes to stderr, compact and colored, or one JSON object
//!   per line when [`LoggerBuilder::json`] is set.
//! * [`LoggerBuilder::path`] adds a daily rolling file written by a
//!   non-blocking worker; keep the returned [`Logger`] alive so it flushes.
//! * The level comes from `RUST_LOG`, falling back to [`LoggerBuilder::level`],
//!   unless [`LoggerBuilder::env_filter`] sets explicit directives.
//!
//! ## Example
//!
//! ```rust
//! use psf_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("psf-server")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//!
//! tracing::debug!(package = "gold", "Package selected");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    json: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    directory: Option<PathBuf>,
    rotation: Rotation,
    max_files: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            json: false,
            level: LevelFilter::INFO,
            env_filter: None,
            directory: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleOnly;
#[derive(Debug)]
pub struct WithFiles;

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleOnly {}
impl Sealed for WithFiles {}

/// Configures the global subscriber. A name is required before [`LoggerBuilder::init`].
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, F: Sealed = ConsoleOnly> {
    config: LoggerConfig,
    name: N,
    files: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<Unnamed, F> {
    /// Names the application; also the prefix of rolled log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { config: self.config, name: Named(name.into()), files: PhantomData }
    }
}

impl<F: Sealed> LoggerBuilder<Named, F> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Explicit directives such as `psf_sponsorship=debug,tower_http=info`.
    ///
    /// These replace `RUST_LOG`. Invalid directives fail [`LoggerBuilder::init`].
    #[must_use]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.config.env_filter = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// One JSON object per event, on every output.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }

    /// Also writes rolling log files into `directory`, created if missing.
    pub fn path(self, directory: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFiles> {
        let mut config = self.config;
        config.directory = Some(directory.into());
        LoggerBuilder { config, name: self.name, files: PhantomData }
    }

    /// Installs the subscriber.
    ///
    /// # Errors
    /// [`LoggerError::Subscriber`] if a global subscriber already exists,
    /// [`LoggerError::InvalidConfiguration`] for an empty name, zero retained
    /// files, bad directives or no output at all.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let LoggerBuilder { config, name: Named(name), .. } = self;
        validate(&config, &name)?;
        let filter = env_filter(&config)?;

        let mut layers = Vec::new();

        if config.console {
            let console = layer().with_writer(std::io::stderr);
            layers.push(if config.json {
                console.json().boxed()
            } else {
                console.compact().with_ansi(true).boxed()
            });
        }

        let guard = match &config.directory {
            Some(directory) => {
                std::fs::create_dir_all(directory).context(directory.display().to_string())?;

                let appender = RollingFileAppender::builder()
                    .rotation(config.rotation.clone())
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(config.max_files)
                    .build(directory)
                    .context(directory.display().to_string())?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let file = layer().with_writer(writer).with_ansi(false);
                layers.push(if config.json { file.json().boxed() } else { file.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::invalid("Console disabled and no log directory set"));
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %name, json = config.json, "Logging initialized");

        Ok(Logger { guard })
    }
}

impl LoggerBuilder<Named, WithFiles> {
    /// How many rolled files to keep.
    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }
}

/// Keeps the file writer alive; logs buffered for files are flushed on drop.
#[must_use = "dropping the logger stops file logging"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: Unnamed, files: PhantomData }
    }

    /// Whether a file writer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

fn validate(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::invalid("Logger name cannot be empty"));
    }
    if config.max_files == 0 {
        return Err(LoggerError::invalid("max_files must be greater than zero"));
    }
    Ok(())
}

fn env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    match &config.env_filter {
        None => Ok(builder.from_env_lossy()),
        Some(directives) => builder.parse(directives).map_err(|e| {
            LoggerError::invalid(format!("Invalid env filter '{directives}': {e}"))
        }),
    }
}
