//! Which unchecked benefits may be checked, given the active package.

use crate::catalog::{Benefit, Package};
use psf_domain::constants::{
    A_LA_CARTE_DISALLOWED, NO_CAPACITY_MESSAGE, PACKAGE_ONLY_MESSAGE, STANDALONE_DISALLOWED,
};

/// Reason a benefit cannot be checked right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Restriction {
    AtCapacity,
    PackageOnly,
    StandaloneWithPackage,
    ALaCarteDisallowed,
}

impl Restriction {
    /// Text shown next to (or as the title of) the disabled input.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AtCapacity => NO_CAPACITY_MESSAGE,
            Self::PackageOnly => PACKAGE_ONLY_MESSAGE,
            Self::StandaloneWithPackage => STANDALONE_DISALLOWED,
            Self::ALaCarteDisallowed => A_LA_CARTE_DISALLOWED,
        }
    }
}

/// Returns why `benefit` may not be checked, or `None` when it may.
///
/// Members of the active package are always eligible; everything else is
/// judged by its flags and the package's à-la-carte policy.
#[must_use]
pub fn restriction(benefit: &Benefit, package: Option<&Package>) -> Option<Restriction> {
    match package {
        Some(package) if package.includes(&benefit.id) => None,
        _ if benefit.is_unavailable() => Some(Restriction::AtCapacity),
        Some(_) if benefit.is_standalone() => Some(Restriction::StandaloneWithPackage),
        _ if benefit.is_package_only() => Some(Restriction::PackageOnly),
        Some(package) if !package.allow_a_la_carte => Some(Restriction::ALaCarteDisallowed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psf_domain::catalog::BenefitFlags;

    fn benefit(id: &str, flags: BenefitFlags) -> Benefit {
        Benefit {
            id: id.into(),
            name: String::new(),
            cost: None,
            conflicts: Default::default(),
            flags,
        }
    }

    fn package(members: &[&str], allow_a_la_carte: bool) -> Package {
        Package {
            id: "gold".into(),
            name: "Gold".into(),
            cost: 5000,
            benefits: members.iter().map(|&m| m.into()).collect(),
            allow_a_la_carte,
        }
    }

    #[test]
    fn without_package_only_package_only_and_sold_out_are_blocked() {
        assert_eq!(restriction(&benefit("a", BenefitFlags::empty()), None), None);
        assert_eq!(restriction(&benefit("s", BenefitFlags::STANDALONE), None), None);
        assert_eq!(
            restriction(&benefit("p", BenefitFlags::PACKAGE_ONLY), None),
            Some(Restriction::PackageOnly)
        );
        assert_eq!(
            restriction(&benefit("u", BenefitFlags::UNAVAILABLE), None),
            Some(Restriction::AtCapacity)
        );
    }

    #[test]
    fn bundle_members_are_always_eligible() {
        let gold = package(&["p"], false);
        let flags = BenefitFlags::PACKAGE_ONLY | BenefitFlags::UNAVAILABLE;
        assert_eq!(restriction(&benefit("p", flags), Some(&gold)), None);
    }

    #[test]
    fn package_blocks_standalone_and_foreign_package_only() {
        let gold = package(&[], true);
        assert_eq!(
            restriction(&benefit("s", BenefitFlags::STANDALONE), Some(&gold)),
            Some(Restriction::StandaloneWithPackage)
        );
        assert_eq!(
            restriction(&benefit("p", BenefitFlags::PACKAGE_ONLY), Some(&gold)),
            Some(Restriction::PackageOnly)
        );
        assert_eq!(restriction(&benefit("x", BenefitFlags::empty()), Some(&gold)), None);
    }

    #[test]
    fn closed_package_blocks_add_ons() {
        let closed = package(&[], false);
        let blocked = restriction(&benefit("x", BenefitFlags::empty()), Some(&closed));
        assert_eq!(blocked, Some(Restriction::ALaCarteDisallowed));
        assert_eq!(blocked.map(Restriction::message), Some(A_LA_CARTE_DISALLOWED));
    }
}
