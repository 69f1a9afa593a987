//! The package/benefit selection state machine.

use crate::catalog::{Benefit, Catalog, Package};
use crate::customization::{Customization, has_user_customization, user_customization};
use crate::eligibility::{Restriction, restriction};
use crate::error::SponsorshipError;
use crate::form::ApplicationForm;
use crate::pricing::{CostResolver, CostStatus, PricingInput, Resolution, StaticCosts};
use crate::quote::{QuoteBook, QuoteOutcome, QuoteRequest, QuoteTicket, SettledQuote};
use psf_domain::catalog::{BenefitId, PackageId};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Where the selection stands relative to the packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    NoPackage,
    Package {
        id: PackageId,
        /// `true` while the selection still matches the bundle as sold.
        clean: bool,
    },
}

/// Result of [`Configurator::toggle_benefit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// Now checked; conflicting benefits that were checked before were unchecked.
    Checked { evicted: Vec<BenefitId> },
    Unchecked,
    /// Not in the catalog; nothing changed.
    Ignored,
}

/// Selection state of one application form.
///
/// Every operation leaves the selection consistent: no two checked benefits
/// conflict, package-only benefits are checked only as part of the active
/// package, and the cost reflects the current selection.
#[derive(Debug, Clone)]
pub struct Configurator<R = StaticCosts> {
    catalog: Arc<Catalog>,
    resolver: R,
    package: Option<PackageId>,
    selected: BTreeSet<BenefitId>,
    cost: CostStatus,
    quotes: QuoteBook,
}

impl Configurator<StaticCosts> {
    /// A configurator that prices from the catalog alone.
    #[must_use]
    pub fn with_static_costs(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, StaticCosts)
    }
}

impl<R: CostResolver> Configurator<R> {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, resolver: R) -> Self {
        Self {
            catalog,
            resolver,
            package: None,
            selected: BTreeSet::new(),
            cost: CostStatus::Empty,
            quotes: QuoteBook::default(),
        }
    }

    /// Rebuilds the state a previously submitted (or server-rendered) form describes.
    ///
    /// The package is selected first, then bundle members missing from the form
    /// are unchecked and extra benefits checked, in form order.
    ///
    /// # Errors
    /// Unknown package or benefit ids, benefits that are not eligible next to
    /// the form's package, and pairs of conflicting benefits.
    pub fn restore(
        catalog: Arc<Catalog>,
        resolver: R,
        form: &ApplicationForm,
    ) -> Result<Self, SponsorshipError> {
        let mut configurator = Self::new(catalog, resolver);

        if let Some(package) = form.selected_package() {
            configurator.select_package(package)?;
        }

        let wanted: BTreeSet<&BenefitId> = form.benefits.iter().collect();
        let unwanted: Vec<BenefitId> =
            configurator.selected.iter().filter(|id| !wanted.contains(id)).cloned().collect();
        for id in &unwanted {
            configurator.toggle_benefit(id)?;
        }

        for id in &form.benefits {
            if configurator.selected.contains(id) {
                continue;
            }
            if configurator.toggle_benefit(id)? == Toggle::Ignored {
                return Err(SponsorshipError::UnknownBenefit { benefit: id.clone(), context: None });
            }
        }

        // A later benefit evicts an earlier conflicting one; the form never had both.
        if let Some(lost) = form.benefits.iter().find(|id| !configurator.selected.contains(*id)) {
            let winner = form
                .benefits
                .iter()
                .find(|other| configurator.catalog.conflicting(lost, other))
                .map_or_else(String::new, ToString::to_string);
            return Err(SponsorshipError::BenefitUnavailable {
                benefit: lost.clone(),
                message: format!("conflicts with '{winner}'").into(),
                context: None,
            });
        }

        Ok(configurator)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn selected_package(&self) -> Option<&Package> {
        self.package.as_ref().and_then(|id| self.catalog.package(id))
    }

    /// Checked benefits in catalog order.
    pub fn selected_benefits(&self) -> impl Iterator<Item = &Benefit> + '_ {
        self.catalog.benefits().iter().filter(|benefit| self.selected.contains(&benefit.id))
    }

    #[must_use]
    pub fn is_selected(&self, id: &BenefitId) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub const fn cost(&self) -> CostStatus {
        self.cost
    }

    #[must_use]
    pub fn cost_label(&self) -> String {
        self.cost.to_string()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.selected_package() {
            None => Phase::NoPackage,
            Some(package) => Phase::Package {
                id: package.id.clone(),
                clean: !has_user_customization(&self.catalog, package, &self.selected),
            },
        }
    }

    /// Additions and removals relative to the active package.
    #[must_use]
    pub fn customization(&self) -> Option<Customization> {
        self.selected_package()
            .map(|package| user_customization(&self.catalog, package, &self.selected))
    }

    /// Why `id` cannot be checked right now; `None` if it can, or is already checked.
    #[must_use]
    pub fn restriction(&self, id: &BenefitId) -> Option<Restriction> {
        if self.selected.contains(id) {
            return None;
        }
        self.catalog.benefit(id).and_then(|benefit| restriction(benefit, self.selected_package()))
    }

    /// Unchecked benefits that may not be checked, in catalog order.
    pub fn disabled_benefits(&self) -> impl Iterator<Item = &BenefitId> + '_ {
        self.catalog
            .benefits()
            .iter()
            .map(|benefit| &benefit.id)
            .filter(|id| self.restriction(id).is_some())
    }

    /// Selects a package, replacing the whole selection with its bundle.
    ///
    /// A blank id returns to the no-package state with nothing checked. Bundle
    /// members are checked in declared order; one that conflicts with a member
    /// checked before it is skipped. Selecting the active package again resets it.
    ///
    /// # Errors
    /// [`SponsorshipError::UnknownPackage`] for ids not in the catalog; the
    /// selection is left as it was.
    pub fn select_package(&mut self, id: &PackageId) -> Result<Phase, SponsorshipError> {
        if id.is_blank() {
            self.package = None;
            self.selected.clear();
            tracing::debug!("Package cleared");
            self.refresh_cost();
            return Ok(Phase::NoPackage);
        }

        let catalog = Arc::clone(&self.catalog);
        let package = catalog
            .package(id)
            .ok_or_else(|| SponsorshipError::UnknownPackage { package: id.clone(), context: None })?;

        self.selected.clear();
        let mut skipped = Vec::new();
        for member in &package.benefits {
            if self.selected.iter().any(|checked| catalog.conflicting(checked, member)) {
                skipped.push(member);
            } else {
                self.selected.insert(member.clone());
            }
        }
        self.package = Some(package.id.clone());

        tracing::debug!(package = %package.id, skipped = ?skipped, "Package selected");
        self.refresh_cost();
        Ok(self.phase())
    }

    /// Checks or unchecks a benefit.
    ///
    /// Checking a benefit unchecks every checked benefit it conflicts with; the
    /// new choice always wins. Unchecking is always allowed.
    ///
    /// # Errors
    /// [`SponsorshipError::BenefitUnavailable`] when checking a benefit the current
    /// package (or lack of one) does not allow. Nothing changes in that case.
    pub fn toggle_benefit(&mut self, id: &BenefitId) -> Result<Toggle, SponsorshipError> {
        let catalog = Arc::clone(&self.catalog);
        let Some(benefit) = catalog.benefit(id) else {
            tracing::debug!(benefit = %id, "Ignoring unknown benefit");
            return Ok(Toggle::Ignored);
        };

        if self.selected.remove(id) {
            tracing::debug!(benefit = %id, "Benefit unchecked");
            self.refresh_cost();
            return Ok(Toggle::Unchecked);
        }

        if let Some(blocked) = restriction(benefit, self.selected_package()) {
            return Err(SponsorshipError::BenefitUnavailable {
                benefit: id.clone(),
                message: blocked.message().into(),
                context: None,
            });
        }

        let evicted: Vec<BenefitId> =
            self.selected.iter().filter(|checked| benefit.conflicts_with(checked)).cloned().collect();
        for conflict in &evicted {
            self.selected.remove(conflict);
        }
        self.selected.insert(id.clone());

        tracing::debug!(benefit = %id, evicted = ?evicted, "Benefit checked");
        self.refresh_cost();
        Ok(Toggle::Checked { evicted })
    }

    /// Back to the initial state: no package, nothing checked, empty label.
    pub fn clear_form(&mut self) {
        self.package = None;
        self.selected.clear();
        self.quotes.invalidate();
        self.cost = CostStatus::Empty;
        tracing::debug!("Form cleared");
    }

    /// The selection as it would be submitted.
    #[must_use]
    pub fn form(&self) -> ApplicationForm {
        ApplicationForm {
            package: self.package.clone(),
            benefits: self.selected_benefits().map(|benefit| benefit.id.clone()).collect(),
        }
    }

    /// Hands out the pending cost lookup, at most once per ticket.
    pub fn take_quote_request(&mut self) -> Option<QuoteRequest> {
        self.quotes.take()
    }

    /// Ticket of the lookup whose answer is still awaited.
    #[must_use]
    pub const fn awaited_quote(&self) -> Option<QuoteTicket> {
        self.quotes.awaiting()
    }

    /// Applies the answer to a cost lookup.
    ///
    /// Answers to anything but the latest ticket are ignored. A failed lookup
    /// leaves the "Updating cost..." label in place; there is no retry.
    pub fn settle_quote(
        &mut self,
        ticket: QuoteTicket,
        result: Result<u64, SponsorshipError>,
    ) -> QuoteOutcome {
        if !self.quotes.accept(ticket) {
            tracing::debug!(ticket = %ticket, "Dropping stale cost answer");
            return QuoteOutcome::Stale;
        }

        match result {
            Ok(amount) => {
                self.cost = CostStatus::Fixed(amount);
                QuoteOutcome::Applied(amount)
            },
            Err(err) => {
                tracing::warn!(ticket = %ticket, error = %err, "Cost lookup failed");
                QuoteOutcome::Failed
            },
        }
    }

    /// [`Self::settle_quote`] for a [`SettledQuote`] from a [`crate::QuoteDriver`].
    pub fn apply_quote(&mut self, settled: SettledQuote) -> QuoteOutcome {
        self.settle_quote(settled.ticket, settled.result)
    }

    fn refresh_cost(&mut self) {
        let package = self.package.as_ref().and_then(|id| self.catalog.package(id));
        let input = PricingInput {
            catalog: &self.catalog,
            package,
            selected: &self.selected,
            customized: package
                .is_some_and(|package| has_user_customization(&self.catalog, package, &self.selected)),
        };

        match self.resolver.resolve(&input) {
            Resolution::Settled(status) => {
                self.quotes.invalidate();
                self.cost = status;
            },
            Resolution::Deferred => {
                let form = self.form();
                let ticket = self.quotes.issue(form);
                self.cost = CostStatus::Updating;
                tracing::debug!(ticket = %ticket, "Cost deferred to lookup");
            },
        }
    }
}
