use psf_derive::psf_error;
use std::borrow::Cow;

#[psf_error]
pub enum CatalogError {
    #[error("Catalog IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: CatalogError = "broken".into();
    assert_eq!(err.to_string(), "Internal catalog error: broken");
}
