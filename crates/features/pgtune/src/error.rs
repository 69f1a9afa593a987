use std::borrow::Cow;

/// A specialized [`TuneError`] enum of this crate.
#[psf_derive::psf_error]
pub enum TuneError {
    /// An input the provisioning layer supplied is not usable. Raised eagerly; never recovered.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Failed to read system memory{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal tuning error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl TuneError {
    pub(crate) fn bad_value(value: &str, attribute: &str, valid: &str) -> Self {
        Self::InvalidConfiguration {
            message: format!("Bad value ({value}) for {attribute} attribute. Valid values are {valid}.")
                .into(),
            context: None,
        }
    }
}
