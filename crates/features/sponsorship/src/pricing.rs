//! Cost status and the strategies that compute it.

use crate::catalog::{Catalog, Package};
use psf_domain::catalog::BenefitId;
use psf_domain::config::CostResolutionMode;
use psf_domain::constants::{CUSTOM_COST_LABEL, UPDATING_COST_LABEL};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// What the cost label currently says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum CostStatus {
    /// Nothing selected.
    #[default]
    Empty,
    /// A price in whole US dollars.
    Fixed(u64),
    /// The selection needs a manual quote.
    Custom,
    /// An authoritative lookup is in flight.
    Updating,
}

impl CostStatus {
    #[must_use]
    pub const fn amount(self) -> Option<u64> {
        match self {
            Self::Fixed(amount) => Some(amount),
            _ => None,
        }
    }
}

impl fmt::Display for CostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Fixed(amount) => write!(f, "Sponsorship cost is ${} USD", group_thousands(*amount)),
            Self::Custom => f.write_str(CUSTOM_COST_LABEL),
            Self::Updating => f.write_str(UPDATING_COST_LABEL),
        }
    }
}

/// `5000` becomes `5,000`.
fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Everything a strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct PricingInput<'a> {
    pub catalog: &'a Catalog,
    pub package: Option<&'a Package>,
    pub selected: &'a BTreeSet<BenefitId>,
    /// Whether `selected` diverges from `package` as sold.
    pub customized: bool,
}

/// Result of asking a strategy for the cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Settled(CostStatus),
    /// The price has to come from the cost endpoint.
    Deferred,
}

/// Strategy for pricing a selection.
pub trait CostResolver: fmt::Debug + Send + Sync {
    fn resolve(&self, input: &PricingInput<'_>) -> Resolution;
}

/// Prices straight from the catalog.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StaticCosts;

impl StaticCosts {
    #[must_use]
    pub fn price(input: &PricingInput<'_>) -> CostStatus {
        match input.package {
            Some(_) if input.customized => CostStatus::Custom,
            Some(package) => CostStatus::Fixed(package.cost),
            None if input.selected.is_empty() => CostStatus::Empty,
            None => input
                .selected
                .iter()
                .map(|id| input.catalog.benefit(id).and_then(|benefit| benefit.cost))
                .sum::<Option<u64>>()
                .map_or(CostStatus::Custom, CostStatus::Fixed),
        }
    }
}

impl CostResolver for StaticCosts {
    fn resolve(&self, input: &PricingInput<'_>) -> Resolution {
        Resolution::Settled(Self::price(input))
    }
}

/// Defers every price the catalog could state to the cost endpoint.
///
/// Custom and empty selections settle locally; there is nothing to ask for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RemoteCosts;

impl CostResolver for RemoteCosts {
    fn resolve(&self, input: &PricingInput<'_>) -> Resolution {
        match StaticCosts::price(input) {
            CostStatus::Fixed(_) => Resolution::Deferred,
            other => Resolution::Settled(other),
        }
    }
}

/// Strategy picked from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
    Static(StaticCosts),
    Remote(RemoteCosts),
}

impl From<CostResolutionMode> for Pricing {
    fn from(mode: CostResolutionMode) -> Self {
        match mode {
            CostResolutionMode::Static => Self::Static(StaticCosts),
            CostResolutionMode::Remote => Self::Remote(RemoteCosts),
        }
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self::Static(StaticCosts)
    }
}

impl CostResolver for Pricing {
    fn resolve(&self, input: &PricingInput<'_>) -> Resolution {
        match self {
            Self::Static(inner) => inner.resolve(input),
            Self::Remote(inner) => inner.resolve(input),
        }
    }
}
