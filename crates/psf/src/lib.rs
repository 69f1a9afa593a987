//! Facade crate for the sponsorship configurator and the tuning calculator.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `psf` with the desired feature flags (`server`/`remote`).
//! - Call [`init`] to build every feature slice from one [`ApiConfig`].

pub use psf_domain as domain;
use psf_domain::config::ApiConfig;
use psf_domain::registry::InitializedSlice;
pub use psf_kernel as kernel;
use std::borrow::Cow;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use psf_kernel::server::ApiState;
        pub use psf_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// System routes plus the routes of every feature slice.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            system_router()
                .merge(crate::features::sponsorship::handlers::router())
                .merge(crate::features::pgtune::handlers::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use psf_pgtune as pgtune;
    pub use psf_sponsorship as sponsorship;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "sponsorship",
        "pgtune",
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "remote")]
        "remote",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[psf_derive::psf_error]
pub enum InitError {
    #[error("Sponsorship bootstrap failed{}: {source}", format_context(.context))]
    Sponsorship { source: psf_sponsorship::SponsorshipError, context: Option<Cow<'static, str>> },

    #[error("Tuning bootstrap failed{}: {source}", format_context(.context))]
    Pgtune { source: psf_pgtune::TuneError, context: Option<Cow<'static, str>> },
}

/// Initialize all features.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &ApiConfig) -> Result<Vec<InitializedSlice>, InitError> {
    let mut slices = Vec::new();

    // Sponsorship application form
    slices.push(features::sponsorship::init(config)?);

    // PostgreSQL tuning
    slices.push(features::pgtune::init(config)?);

    Ok(slices)
}
