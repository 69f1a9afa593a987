//! Validated, indexed sponsorship catalog.

use crate::error::{SponsorshipError, SponsorshipErrorExt};
use fxhash::{FxHashMap, FxHashSet};
use psf_domain::catalog::{
    BenefitFlags, BenefitId, BenefitRecord, CatalogDocument, PackageId, PackageRecord,
};
use std::collections::BTreeSet;
use std::path::Path;

/// One sponsorship perk, with conflicts made symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benefit {
    pub id: BenefitId,
    pub name: String,
    pub cost: Option<u64>,
    pub conflicts: BTreeSet<BenefitId>,
    pub flags: BenefitFlags,
}

impl Benefit {
    #[must_use]
    pub fn is_package_only(&self) -> bool {
        self.flags.contains(BenefitFlags::PACKAGE_ONLY)
    }

    #[must_use]
    pub fn is_standalone(&self) -> bool {
        self.flags.contains(BenefitFlags::STANDALONE)
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.flags.contains(BenefitFlags::UNAVAILABLE)
    }

    #[must_use]
    pub fn conflicts_with(&self, other: &BenefitId) -> bool {
        self.conflicts.contains(other)
    }
}

/// A fixed-price bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub id: PackageId,
    pub name: String,
    pub cost: u64,
    /// Bundled benefits in declared order.
    pub benefits: Vec<BenefitId>,
    pub allow_a_la_carte: bool,
}

impl Package {
    #[must_use]
    pub fn includes(&self, benefit: &BenefitId) -> bool {
        self.benefits.contains(benefit)
    }
}

/// Immutable catalog: benefits and packages in authored order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    benefits: Vec<Benefit>,
    packages: Vec<Package>,
    benefit_index: FxHashMap<BenefitId, usize>,
    package_index: FxHashMap<PackageId, usize>,
}

impl Catalog {
    /// Validates a document and builds the indexes.
    ///
    /// # Errors
    /// [`SponsorshipError::InvalidCatalog`] on blank or duplicate ids, self-conflicts,
    /// and conflicts or package members that reference unknown benefits.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, SponsorshipError> {
        let mut benefit_index = FxHashMap::default();
        for (position, record) in doc.benefits.iter().enumerate() {
            if record.id.is_blank() {
                return Err(SponsorshipError::invalid_catalog(format!(
                    "benefit #{position} has a blank id"
                )));
            }
            if benefit_index.insert(record.id.clone(), position).is_some() {
                return Err(SponsorshipError::invalid_catalog(format!(
                    "duplicate benefit id '{}'",
                    record.id
                )));
            }
        }

        let mut benefits: Vec<Benefit> = doc.benefits.into_iter().map(Benefit::from).collect();

        // Conflicts bind both ways no matter which side declared them.
        let mut mirrored = Vec::new();
        for benefit in &benefits {
            for other in &benefit.conflicts {
                if other == &benefit.id {
                    return Err(SponsorshipError::invalid_catalog(format!(
                        "benefit '{}' conflicts with itself",
                        benefit.id
                    )));
                }
                let Some(&target) = benefit_index.get(other) else {
                    return Err(SponsorshipError::invalid_catalog(format!(
                        "benefit '{}' conflicts with unknown benefit '{other}'",
                        benefit.id
                    )));
                };
                mirrored.push((target, benefit.id.clone()));
            }
        }
        for (target, id) in mirrored {
            benefits[target].conflicts.insert(id);
        }

        let mut package_index = FxHashMap::default();
        let mut packages = Vec::with_capacity(doc.packages.len());
        for (position, record) in doc.packages.into_iter().enumerate() {
            validate_package(&record, position, &benefit_index)?;
            if package_index.insert(record.id.clone(), position).is_some() {
                return Err(SponsorshipError::invalid_catalog(format!(
                    "duplicate package id '{}'",
                    record.id
                )));
            }
            packages.push(Package::from(record));
        }

        tracing::debug!(
            benefits = benefits.len(),
            packages = packages.len(),
            "Sponsorship catalog validated"
        );

        Ok(Self { benefits, packages, benefit_index, package_index })
    }

    /// Parses and validates a JSON catalog document.
    pub fn from_json(json: &str) -> Result<Self, SponsorshipError> {
        let doc: CatalogDocument = serde_json::from_str(json).context("catalog document")?;
        Self::from_document(doc)
    }

    /// Reads, parses and validates a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SponsorshipError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).context(path.display().to_string())?;
        Self::from_json(&json).context(path.display().to_string())
    }

    #[must_use]
    pub fn benefit(&self, id: &BenefitId) -> Option<&Benefit> {
        self.benefit_index.get(id).map(|&i| &self.benefits[i])
    }

    #[must_use]
    pub fn package(&self, id: &PackageId) -> Option<&Package> {
        self.package_index.get(id).map(|&i| &self.packages[i])
    }

    /// Benefits in authored order.
    #[must_use]
    pub fn benefits(&self) -> &[Benefit] {
        &self.benefits
    }

    /// Packages in authored order.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    #[must_use]
    pub fn conflicting(&self, a: &BenefitId, b: &BenefitId) -> bool {
        self.benefit(a).is_some_and(|benefit| benefit.conflicts_with(b))
    }

    /// Position of a benefit in authored order; used to keep outputs stable.
    pub(crate) fn benefit_position(&self, id: &BenefitId) -> Option<usize> {
        self.benefit_index.get(id).copied()
    }

    /// Serializable form, with the symmetric conflicts written out.
    #[must_use]
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            benefits: self.benefits.iter().map(BenefitRecord::from).collect(),
            packages: self.packages.iter().map(PackageRecord::from).collect(),
        }
    }
}

fn validate_package(
    record: &PackageRecord,
    position: usize,
    benefit_index: &FxHashMap<BenefitId, usize>,
) -> Result<(), SponsorshipError> {
    if record.id.is_blank() {
        return Err(SponsorshipError::invalid_catalog(format!("package #{position} has a blank id")));
    }
    let mut seen = FxHashSet::default();
    for member in &record.benefits {
        if !benefit_index.contains_key(member) {
            return Err(SponsorshipError::invalid_catalog(format!(
                "package '{}' bundles unknown benefit '{member}'",
                record.id
            )));
        }
        if !seen.insert(member) {
            return Err(SponsorshipError::invalid_catalog(format!(
                "package '{}' bundles benefit '{member}' twice",
                record.id
            )));
        }
    }
    Ok(())
}

impl From<BenefitRecord> for Benefit {
    fn from(record: BenefitRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            cost: record.cost,
            conflicts: record.conflicts.into_iter().collect(),
            flags: record.flags,
        }
    }
}

impl From<&Benefit> for BenefitRecord {
    fn from(benefit: &Benefit) -> Self {
        Self {
            id: benefit.id.clone(),
            name: benefit.name.clone(),
            cost: benefit.cost,
            conflicts: benefit.conflicts.iter().cloned().collect(),
            flags: benefit.flags,
        }
    }
}

impl From<PackageRecord> for Package {
    fn from(record: PackageRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            cost: record.cost,
            benefits: record.benefits,
            allow_a_la_carte: record.allow_a_la_carte,
        }
    }
}

impl From<&Package> for PackageRecord {
    fn from(package: &Package) -> Self {
        Self {
            id: package.id.clone(),
            name: package.name.clone(),
            cost: package.cost,
            benefits: package.benefits.clone(),
            allow_a_la_carte: package.allow_a_la_carte,
        }
    }
}
