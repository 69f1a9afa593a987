use psf_domain::catalog::{BenefitId, PackageId};
use std::borrow::Cow;

/// A specialized [`SponsorshipError`] enum of this crate.
#[psf_derive::psf_error]
pub enum SponsorshipError {
    /// A package id that the catalog does not know. The selection is left untouched.
    #[error("Unknown package '{package}'{}", format_context(.context))]
    UnknownPackage { package: PackageId, context: Option<Cow<'static, str>> },

    /// Raised when a submitted form names a benefit the catalog lacks. Interactive
    /// toggles of unknown benefits are ignored instead.
    #[error("Unknown benefit '{benefit}'{}", format_context(.context))]
    UnknownBenefit { benefit: BenefitId, context: Option<Cow<'static, str>> },

    /// The benefit exists but cannot be checked in the current selection.
    #[error("Benefit '{benefit}' unavailable{}: {message}", format_context(.context))]
    BenefitUnavailable {
        benefit: BenefitId,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The selection has no list price and needs a manual quote.
    #[error("Custom quote required{}: {message}", format_context(.context))]
    CustomQuote { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid catalog{}: {message}", format_context(.context))]
    InvalidCatalog { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Catalog parse error{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Catalog I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The cost endpoint answered, but not with a usable cost.
    #[error("Cost lookup failed{}: {message}", format_context(.context))]
    Remote { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[cfg(feature = "remote")]
    #[error("Cost endpoint unreachable{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal sponsorship error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SponsorshipError {
    pub(crate) fn invalid_catalog(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidCatalog { message: message.into(), context: None }
    }
}
