//! HTTP surface: the catalog and the authoritative cost endpoint.

use crate::{ApplicationForm, CostResponse, Sponsorship, SponsorshipError};
use axum::Json;
use axum::extract::State;
use psf_derive::api_handler;
use psf_domain::catalog::CatalogDocument;
use psf_domain::constants::SPONSORSHIP_TAG;
use psf_kernel::server::{ApiError, ApiState};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(catalog_handler)).routes(routes!(cost_handler))
}

#[api_handler(
    get,
    path = "/api/sponsorship/catalog",
    responses((status = OK, description = "Packages and benefits, conflicts listed on both sides")),
    tag = SPONSORSHIP_TAG,
)]
pub(crate) async fn catalog_handler(
    State(state): State<ApiState>,
) -> Result<Json<CatalogDocument>, ApiError> {
    let slice = state.try_get_slice::<Sponsorship>()?;
    Ok(Json(slice.catalog.to_document()))
}

#[api_handler(
    post,
    path = "/api/sponsorship/cost",
    request_body = ApplicationForm,
    responses(
        (status = OK, description = "List price of the selection", body = CostResponse),
        (status = NOT_FOUND, description = "Unknown package or benefit"),
        (status = CONFLICT, description = "Ineligible benefit, or the selection needs a custom quote"),
    ),
    tag = SPONSORSHIP_TAG,
)]
pub(crate) async fn cost_handler(
    State(state): State<ApiState>,
    Json(form): Json<ApplicationForm>,
) -> Result<Json<CostResponse>, ApiError> {
    let slice = state.try_get_slice::<Sponsorship>()?;
    let cost = slice.cost_source().quote(&form).map_err(to_api_error)?;
    Ok(Json(CostResponse { cost }))
}

fn to_api_error(err: SponsorshipError) -> ApiError {
    let message = err.to_string().into();
    match err {
        SponsorshipError::UnknownPackage { .. } | SponsorshipError::UnknownBenefit { .. } => {
            ApiError::NotFound { message, context: None }
        },
        SponsorshipError::BenefitUnavailable { .. } | SponsorshipError::CustomQuote { .. } => {
            ApiError::Conflict { message, context: None }
        },
        _ => ApiError::Internal { message, context: None },
    }
}
