//! Render-ready projection of a [`Configurator`].

use crate::configurator::{Configurator, Phase};
use crate::pricing::{CostResolver, CostStatus};
use psf_domain::catalog::{BenefitFlags, BenefitId, PackageId};
use psf_domain::constants::{DESKTOP_WIDTH_LIMIT, NEW_BENEFIT_MESSAGE};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitView {
    pub id: BenefitId,
    pub name: String,
    pub checked: bool,
    pub disabled: bool,
    /// Label highlight; follows `checked`.
    pub highlighted: bool,
    /// Why the input is disabled, empty otherwise.
    pub title: &'static str,
    /// Badge text for benefits new this year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    /// Packages whose bundle lists this benefit.
    pub packages: Vec<PackageId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageView {
    pub id: PackageId,
    pub name: String,
    pub selected: bool,
    /// Shown next to the selected package once the selection diverges from it.
    pub custom_fee: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub packages: Vec<PackageView>,
    pub benefits: Vec<BenefitView>,
    pub a_la_carte_disallowed: bool,
    pub standalone_disallowed: bool,
    pub cost: CostStatus,
    pub cost_label: String,
}

impl FormView {
    #[must_use]
    pub fn selected_package(&self) -> Option<&PackageId> {
        self.packages.iter().find(|package| package.selected).map(|package| &package.id)
    }
}

impl<R: CostResolver> Configurator<R> {
    /// Derives everything a form renderer needs from the current selection.
    #[must_use]
    pub fn view(&self) -> FormView {
        let catalog = self.catalog();
        let active = self.selected_package();
        let customized = matches!(self.phase(), Phase::Package { clean: false, .. });

        let benefits = catalog
            .benefits()
            .iter()
            .map(|benefit| {
                let checked = self.is_selected(&benefit.id);
                let blocked = self.restriction(&benefit.id);
                BenefitView {
                    id: benefit.id.clone(),
                    name: benefit.name.clone(),
                    checked,
                    disabled: blocked.is_some(),
                    highlighted: checked,
                    title: blocked.map_or("", |reason| reason.message()),
                    badge: benefit.flags.contains(BenefitFlags::NEW).then_some(NEW_BENEFIT_MESSAGE),
                    packages: catalog
                        .packages()
                        .iter()
                        .filter(|package| package.includes(&benefit.id))
                        .map(|package| package.id.clone())
                        .collect(),
                }
            })
            .collect();

        let packages = catalog
            .packages()
            .iter()
            .map(|package| {
                let selected = active.is_some_and(|a| a.id == package.id);
                PackageView {
                    id: package.id.clone(),
                    name: package.name.clone(),
                    selected,
                    custom_fee: selected && customized,
                }
            })
            .collect();

        FormView {
            packages,
            benefits,
            a_la_carte_disallowed: active.is_some_and(|package| !package.allow_a_la_carte),
            standalone_disallowed: active.is_some(),
            cost: self.cost(),
            cost_label: self.cost_label(),
        }
    }
}

/// Narrow viewports show one package column at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileLayout {
    pub width_limit: u32,
}

impl Default for MobileLayout {
    fn default() -> Self {
        Self { width_limit: DESKTOP_WIDTH_LIMIT }
    }
}

impl MobileLayout {
    #[must_use]
    pub const fn new(width_limit: u32) -> Self {
        Self { width_limit }
    }

    #[must_use]
    pub const fn is_mobile(&self, width: u32) -> bool {
        width <= self.width_limit
    }

    /// Package column to show at `width`; `None` means show every column.
    #[must_use]
    pub fn visible_package<'a>(&self, width: u32, view: &'a FormView) -> Option<&'a PackageId> {
        if self.is_mobile(width) { view.selected_package() } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::sync::Arc;

    fn configurator() -> Configurator {
        let catalog = Catalog::from_json(
            r#"{
                "benefits": [
                    { "id": "logo", "flags": "NEW" },
                    { "id": "swag", "flags": "PACKAGE_ONLY" },
                    { "id": "jobs", "flags": "STANDALONE" },
                    { "id": "extra" }
                ],
                "packages": [
                    { "id": "gold", "name": "Gold", "cost": 5000, "benefits": ["logo", "swag"], "allowALaCarte": false }
                ]
            }"#,
        )
        .unwrap();
        Configurator::with_static_costs(Arc::new(catalog))
    }

    #[test]
    fn default_view_disables_package_only() {
        let view = configurator().view();
        let swag = &view.benefits[1];

        assert!(swag.disabled);
        assert_eq!(swag.title, "Benefit only available as part of a sponsor package");
        assert!(!view.benefits[2].disabled);
        assert_eq!(view.benefits[0].badge, Some(NEW_BENEFIT_MESSAGE));
        assert_eq!(view.benefits[0].packages, vec![PackageId::from("gold")]);
        assert!(!view.standalone_disallowed);
        assert_eq!(view.cost_label, "");
    }

    #[test]
    fn package_view_marks_selection_and_restrictions() {
        let mut form = configurator();
        form.select_package(&"gold".into()).unwrap();
        let view = form.view();

        assert!(view.packages[0].selected);
        assert!(!view.packages[0].custom_fee);
        assert!(view.benefits[0].checked && view.benefits[0].highlighted);
        assert!(view.a_la_carte_disallowed);
        assert!(view.standalone_disallowed);
        assert!(view.benefits[2].disabled);
        assert!(view.benefits[3].disabled);
        assert_eq!(view.cost_label, "Sponsorship cost is $5,000 USD");

        form.toggle_benefit(&"swag".into()).unwrap();
        let view = form.view();
        assert!(view.packages[0].custom_fee);
        assert!(!view.benefits[1].highlighted);
    }

    #[test]
    fn mobile_layout_shows_only_the_selected_package() {
        let mut form = configurator();
        let layout = MobileLayout::default();
        assert_eq!(layout.visible_package(800, &form.view()), None);

        form.select_package(&"gold".into()).unwrap();
        let view = form.view();
        assert_eq!(layout.visible_package(1200, &view), Some(&PackageId::from("gold")));
        assert_eq!(layout.visible_package(1201, &view), None);
    }
}
