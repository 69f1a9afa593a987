//! Whether a selection still matches a package as sold.

use crate::catalog::{Catalog, Package};
use psf_domain::catalog::BenefitId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Difference between a selection and a package bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Customization {
    pub added_by_user: Vec<BenefitId>,
    pub removed_by_user: Vec<BenefitId>,
}

impl Customization {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_by_user.is_empty() && self.removed_by_user.is_empty()
    }
}

/// Plain set difference in both directions, in catalog order.
#[must_use]
pub fn user_customization(
    catalog: &Catalog,
    package: &Package,
    selected: &BTreeSet<BenefitId>,
) -> Customization {
    let in_order = |ids: Vec<&BenefitId>| {
        let mut ids: Vec<BenefitId> = ids.into_iter().cloned().collect();
        ids.sort_by_key(|id| catalog.benefit_position(id));
        ids
    };

    Customization {
        added_by_user: in_order(selected.iter().filter(|id| !package.includes(id)).collect()),
        removed_by_user: in_order(
            package.benefits.iter().filter(|id| !selected.contains(*id)).collect(),
        ),
    }
}

/// `true` when `selected` no longer matches `package` as sold.
///
/// Bundle members that conflict with something are interchangeable with the
/// benefits they conflict with: the selection matches when
/// * its conflict-free part equals the bundle's conflict-free members, and
/// * every conflict group formed by a bundle member is represented by at least
///   one selected bundle member.
///
/// For bundles without conflicts this is plain set equality.
#[must_use]
pub fn has_user_customization(
    catalog: &Catalog,
    package: &Package,
    selected: &BTreeSet<BenefitId>,
) -> bool {
    let has_conflicts =
        |id: &BenefitId| catalog.benefit(id).is_some_and(|benefit| !benefit.conflicts.is_empty());

    let contested: BTreeSet<&BenefitId> =
        package.benefits.iter().filter(|id| has_conflicts(*id)).collect();
    let settled: BTreeSet<&BenefitId> =
        package.benefits.iter().filter(|id| !has_conflicts(*id)).collect();

    let from_package: BTreeSet<&BenefitId> =
        selected.iter().filter(|id| !contested.contains(id)).collect();
    if from_package != settled {
        return true;
    }

    let remaining: BTreeSet<&BenefitId> =
        selected.iter().filter(|id| contested.contains(id)).collect();
    if remaining.is_empty() && !contested.is_empty() {
        return true;
    }

    let mut groups: Vec<BTreeSet<&BenefitId>> = Vec::new();
    for &member in &contested {
        if groups.iter().any(|group| group.contains(&member)) {
            continue;
        }
        let mut group = BTreeSet::from([member]);
        if let Some(benefit) = catalog.benefit(member) {
            group.extend(benefit.conflicts.iter());
        }
        groups.push(group);
    }

    !groups.iter().all(|group| group.iter().any(|id| remaining.contains(id)))
}
