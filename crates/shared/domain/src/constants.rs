//! Shared string constants (`OpenAPI` tags, UI messages, markers).

pub const SYSTEM_TAG: &str = "System";
pub const SPONSORSHIP_TAG: &str = "Sponsorship";
pub const TUNING_TAG: &str = "Tuning";

/// Shown while an authoritative cost lookup is in flight.
pub const UPDATING_COST_LABEL: &str = "Updating cost...";

/// Shown whenever the selection diverges from a fixed-price package.
pub const CUSTOM_COST_LABEL: &str = "Please submit your customized sponsorship package application \
     and we'll contact you within 2 business days.";

pub const A_LA_CARTE_DISALLOWED: &str = "Cannot add a la carte benefit with the selected package.";
pub const STANDALONE_DISALLOWED: &str =
    "Cannot apply for standalone benefit with the selected package.";
pub const PACKAGE_ONLY_MESSAGE: &str = "Benefit only available as part of a sponsor package";
pub const NO_CAPACITY_MESSAGE: &str = "This benefit is currently at capacity";
pub const NEW_BENEFIT_MESSAGE: &str = "New benefit this year!";

/// Viewports at or below this width render one package column at a time.
pub const DESKTOP_WIDTH_LIMIT: u32 = 1200;
