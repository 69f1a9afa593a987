//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, the slice registry re-export,
//! and (with `server`) the shared Axum state plus the system router.
//!
//! ## Config loading
//! ```rust,no_run
//! use psf_kernel::config::load_config;
//! use psf_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("config/server")).unwrap_or_default();
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use psf_domain as domain;
