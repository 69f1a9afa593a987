//! Common imports for feature slices.

pub use crate::config::{ConfigError, load_config};
pub use psf_domain::config::ApiConfig;
pub use psf_domain::registry::{FeatureSlice, InitializedSlice};

#[cfg(feature = "server")]
pub use crate::server::{ApiError, ApiState, ApiStateError};
