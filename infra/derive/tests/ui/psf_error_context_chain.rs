use psf_derive::psf_error;
use std::borrow::Cow;

#[psf_error]
pub enum TuneError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u64, TuneError> {
    raw.parse::<u64>().context("total_memory")
}

fn reject() -> Result<(), TuneError> {
    Err(TuneError::InvalidConfiguration { message: "bad db_type".into(), context: None })
}

fn main() {
    let err = parse("12x").unwrap_err();
    assert!(err.to_string().starts_with("Parse error (total_memory): "));

    let err = reject().context("pgtune").unwrap_err();
    assert_eq!(err.to_string(), "Invalid configuration (pgtune): bad db_type");

    let converted: TuneError = "7z".parse::<u64>().unwrap_err().into();
    assert!(matches!(converted, TuneError::Parse { context: None, .. }));
}
