//! Sponsorship catalog records as they are authored (JSON documents, server-rendered data).
//!
//! These are raw, unvalidated shapes. The sponsorship slice turns a
//! [`CatalogDocument`] into an indexed, validated catalog.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepts both `"gold"` and `7` for identifiers, since authored catalogs use either.
#[doc(hidden)]
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "RawId", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// An empty id is how forms encode "nothing selected".
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl From<RawId> for $name {
            fn from(raw: RawId) -> Self {
                Self(raw.into())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

catalog_id!(
    /// Identifier of a single sponsorship benefit.
    BenefitId
);

catalog_id!(
    /// Identifier of a sponsorship package (bundle of benefits).
    PackageId
);

bitflags! {
    /// Static properties of a benefit that drive its eligibility.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BenefitFlags: u8 {
        /// Only selectable as part of a package that bundles it.
        const PACKAGE_ONLY = 1 << 0;
        /// Purchasable without a package; never combinable with one.
        const STANDALONE = 1 << 1;
        /// Sold out or hidden from applicants.
        const UNAVAILABLE = 1 << 2;
        /// Display-only "new this year" badge.
        const NEW = 1 << 3;
    }
}

/// One sponsorship perk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitRecord {
    pub id: BenefitId,
    #[serde(default)]
    pub name: String,
    /// À-la-carte price in whole US dollars, if the benefit is sold on its own.
    #[serde(default)]
    pub cost: Option<u64>,
    #[serde(default)]
    pub conflicts: Vec<BenefitId>,
    #[serde(default)]
    pub flags: BenefitFlags,
}

/// A named bundle of benefits sold at a fixed price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub id: PackageId,
    #[serde(default)]
    pub name: String,
    /// Sponsorship amount in whole US dollars.
    pub cost: u64,
    /// Bundled benefits in display order.
    #[serde(default)]
    pub benefits: Vec<BenefitId>,
    #[serde(default = "allow_by_default")]
    pub allow_a_la_carte: bool,
}

const fn allow_by_default() -> bool {
    true
}

/// The whole catalog as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub benefits: Vec<BenefitRecord>,
    pub packages: Vec<PackageRecord>,
}
