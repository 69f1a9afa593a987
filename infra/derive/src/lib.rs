#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate in the workspace.
//!
//! * [`psf_error`] turns a plain enum into a context-aware error type.
//! * [`psf_slice`] wraps feature state into a cheaply clonable slice handle.
//! * [`api_model`] / [`api_handler`] keep HTTP DTOs and handlers consistent.
//!
//! Examples are `ignore`d because a proc-macro crate cannot use its own macros
//! in doctests; the consuming crates carry the real tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to define a standard API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: adds `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: adds `utoipa::ToSchema` when the consuming crate enables `server`.
/// * **Serde Policy**: `rename_all = "camelCase"` unless overridden, and
///   `deny_unknown_fields` unless `deny_unknown_fields = false` is passed.
///
/// # Example
///
/// ```rust,ignore
/// use psf_derive::api_model;
///
/// #[api_model]
/// pub struct CostResponse {
///     pub cost: u64,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts standard `utoipa::path` arguments. The path attribute is only emitted
/// when the consuming crate enables its `server` feature.
///
/// ```rust,ignore
/// #[api_handler(post, path = "/api/pgtune", responses((status = OK)), tag = "Tuning")]
/// pub async fn tune_handler() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for defining domain-specific error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant carrying a `source` field.
/// * `From<SourceError>` for every such variant.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for use in `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field must have the type `Option<Cow<'static, str>>`.
/// 3. Variants wrapping an upstream error (`source` field, `#[source]` or `#[from]`)
///    must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[psf_derive::psf_error]
/// pub enum CatalogError {
///     #[error("Catalog parse error{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(raw: &str) -> Result<Catalog, CatalogError> {
///     let doc = serde_json::from_str(raw).context("Reading catalog document")?;
///     Catalog::try_from(doc).map_err(|_| "Catalog rejected".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn psf_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is generated as an
/// `Arc` wrapper that derefs to the inner state and implements
/// `psf_kernel::domain::registry::FeatureSlice`.
///
/// ```rust,ignore
/// #[psf_derive::psf_slice]
/// pub struct Sponsorship {
///     pub catalog: Arc<Catalog>,
/// }
///
/// let slice = Sponsorship::new(SponsorshipInner { catalog });
/// ```
#[proc_macro_attribute]
pub fn psf_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
