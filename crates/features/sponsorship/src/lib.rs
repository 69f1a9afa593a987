//! # Sponsorship configurator
//!
//! Turns package and benefit clicks on the sponsorship application form into a
//! consistent selection, a cost label and a render-ready view.
//!
//! * [`Catalog`] validates the authored packages and benefits once.
//! * [`Configurator`] owns the selection and enforces conflicts, package-only
//!   and à-la-carte rules on every transition.
//! * [`CostResolver`] decides how a selection is priced: from the catalog
//!   ([`StaticCosts`]) or by deferring to the cost endpoint ([`RemoteCosts`]),
//!   in which case [`QuoteDriver`] performs the lookup and stale answers are dropped.
//!
//! ```
//! use psf_sponsorship::{Catalog, Configurator, Toggle};
//! use std::sync::Arc;
//!
//! let catalog = Catalog::from_json(r#"{
//!     "benefits": [ { "id": "a" }, { "id": "b" }, { "id": "c", "cost": 200, "conflicts": ["a"] } ],
//!     "packages": [ { "id": "gold", "cost": 5000, "benefits": ["a", "b"] } ]
//! }"#).unwrap();
//!
//! let mut form = Configurator::with_static_costs(Arc::new(catalog));
//! form.select_package(&"gold".into()).unwrap();
//! assert_eq!(form.cost_label(), "Sponsorship cost is $5,000 USD");
//!
//! let toggle = form.toggle_benefit(&"c".into()).unwrap();
//! assert_eq!(toggle, Toggle::Checked { evicted: vec!["a".into()] });
//! assert!(form.cost_label().starts_with("Please submit your customized"));
//! ```

pub mod catalog;
pub mod configurator;
pub mod customization;
pub mod eligibility;
mod error;
pub mod form;
#[cfg(feature = "server")]
pub mod handlers;
pub mod pricing;
pub mod quote;
pub mod source;
pub mod view;

pub use crate::catalog::{Benefit, Catalog, Package};
pub use crate::configurator::{Configurator, Phase, Toggle};
pub use crate::customization::Customization;
pub use crate::eligibility::Restriction;
pub use crate::error::{SponsorshipError, SponsorshipErrorExt};
pub use crate::form::{ApplicationForm, CostResponse};
pub use crate::pricing::{CostResolver, CostStatus, Pricing, RemoteCosts, StaticCosts};
pub use crate::quote::{CostSource, QuoteDriver, QuoteOutcome, QuoteRequest, QuoteTicket};
#[cfg(feature = "remote")]
pub use crate::source::HttpCostSource;
pub use crate::source::CatalogCostSource;
pub use crate::view::{FormView, MobileLayout};

use psf_domain::config::ApiConfig;
use psf_kernel::domain::registry::InitializedSlice;
use std::sync::Arc;

/// Sponsorship feature state.
#[psf_derive::psf_slice]
pub struct Sponsorship {
    pub catalog: Arc<Catalog>,
    pub pricing: Pricing,
    pub layout: MobileLayout,
}

impl SponsorshipInner {
    /// A fresh form over the shared catalog.
    #[must_use]
    pub fn configurator(&self) -> Configurator<Pricing> {
        Configurator::new(Arc::clone(&self.catalog), self.pricing)
    }

    #[must_use]
    pub fn cost_source(&self) -> CatalogCostSource {
        CatalogCostSource::new(Arc::clone(&self.catalog))
    }
}

/// Initialize the sponsorship feature.
///
/// Loads `sponsorship.catalog` when configured; without it the catalog is empty.
///
/// # Errors
/// Any catalog read, parse or validation error.
pub fn init(cfg: &ApiConfig) -> Result<InitializedSlice, SponsorshipError> {
    let settings = &cfg.sponsorship;

    let catalog = match &settings.catalog {
        Some(path) => Catalog::load(path)?,
        None => {
            tracing::warn!("No sponsorship catalog configured, serving an empty one");
            Catalog::default()
        },
    };

    tracing::info!(
        packages = catalog.packages().len(),
        benefits = catalog.benefits().len(),
        pricing = ?settings.cost_resolution,
        "Sponsorship slice initialized"
    );

    let inner = SponsorshipInner {
        catalog: Arc::new(catalog),
        pricing: Pricing::from(settings.cost_resolution),
        layout: MobileLayout::new(settings.desktop_width_limit),
    };

    Ok(InitializedSlice::new(Sponsorship::new(inner)))
}
