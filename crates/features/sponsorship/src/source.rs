//! [`CostSource`] implementations.

use crate::catalog::Catalog;
use crate::configurator::Configurator;
use crate::error::SponsorshipError;
use crate::form::ApplicationForm;
use crate::pricing::{CostStatus, StaticCosts};
use crate::quote::CostSource;
use psf_domain::constants::CUSTOM_COST_LABEL;
use std::sync::Arc;

/// Prices forms from a catalog; what the cost endpoint answers with.
#[derive(Debug, Clone)]
pub struct CatalogCostSource {
    catalog: Arc<Catalog>,
}

impl CatalogCostSource {
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Replays `form` against the catalog and returns its list price.
    ///
    /// # Errors
    /// Anything [`Configurator::restore`] rejects, and
    /// [`SponsorshipError::CustomQuote`] when the selection has no list price.
    pub fn quote(&self, form: &ApplicationForm) -> Result<u64, SponsorshipError> {
        let configurator = Configurator::restore(Arc::clone(&self.catalog), StaticCosts, form)?;
        match configurator.cost() {
            CostStatus::Fixed(amount) => Ok(amount),
            CostStatus::Empty => Ok(0),
            CostStatus::Custom => {
                Err(SponsorshipError::CustomQuote { message: CUSTOM_COST_LABEL.into(), context: None })
            },
            CostStatus::Updating => Err("Static pricing never defers".into()),
        }
    }
}

impl CostSource for CatalogCostSource {
    async fn fetch_cost(&self, form: &ApplicationForm) -> Result<u64, SponsorshipError> {
        self.quote(form)
    }
}

#[cfg(feature = "remote")]
pub use self::http::HttpCostSource;

#[cfg(feature = "remote")]
mod http {
    use crate::error::{SponsorshipError, SponsorshipErrorExt};
    use crate::form::{ApplicationForm, CostResponse};
    use crate::quote::CostSource;
    use psf_domain::config::SponsorshipConfig;
    use reqwest::Client;
    use std::time::Duration;

    /// POSTs the form to the cost endpoint and reads `{ "cost": n }` back.
    #[derive(Debug, Clone)]
    pub struct HttpCostSource {
        client: Client,
        endpoint: String,
    }

    impl HttpCostSource {
        pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SponsorshipError> {
            let client = Client::builder().timeout(timeout).build().context("cost client")?;
            Ok(Self { client, endpoint: endpoint.into() })
        }

        /// Uses `sponsorship.cost_endpoint` and `sponsorship.cost_timeout_seconds`.
        pub fn from_config(cfg: &SponsorshipConfig) -> Result<Self, SponsorshipError> {
            let endpoint = cfg.cost_endpoint.clone().ok_or_else(|| SponsorshipError::Remote {
                message: "sponsorship.cost_endpoint is not configured".into(),
                context: None,
            })?;
            Self::new(endpoint, Duration::from_secs(cfg.cost_timeout_seconds))
        }

        #[must_use]
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    impl CostSource for HttpCostSource {
        async fn fetch_cost(&self, form: &ApplicationForm) -> Result<u64, SponsorshipError> {
            let response =
                self.client.post(&self.endpoint).json(form).send().await.context("cost lookup")?;

            let status = response.status();
            if !status.is_success() {
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(err) => {
                        tracing::debug!(error = %err, "Could not read cost endpoint error body");
                        String::new()
                    },
                };
                return Err(SponsorshipError::Remote {
                    message: format!("cost endpoint answered {status}: {body}").into(),
                    context: None,
                });
            }

            let answer: CostResponse = response.json().await.context("cost response")?;
            Ok(answer.cost)
        }
    }
}
