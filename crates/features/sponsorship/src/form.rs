use psf_derive::api_model;
use psf_domain::catalog::{BenefitId, PackageId};

#[api_model]
#[derive(Default, Clone, PartialEq, Eq)]
/// Sponsorship application as submitted, and the body of a cost lookup.
pub struct ApplicationForm {
    /// Selected package; absent for à-la-carte only applications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>))]
    pub package: Option<PackageId>,
    /// Checked benefits in catalog order
    #[serde(default)]
    #[cfg_attr(feature = "server", schema(value_type = Vec<String>))]
    pub benefits: Vec<BenefitId>,
}

impl ApplicationForm {
    /// Package id with blank values treated as "no package".
    #[must_use]
    pub fn selected_package(&self) -> Option<&PackageId> {
        self.package.as_ref().filter(|id| !id.is_blank())
    }
}

#[api_model]
#[derive(Clone, Copy, PartialEq, Eq)]
/// Answer of the cost endpoint.
pub struct CostResponse {
    /// Sponsorship amount in whole US dollars
    pub cost: u64,
}
