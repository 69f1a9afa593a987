//! HTTP surface of the tuning calculator.

use crate::{Pgtune, TuneError, TuningProfile, TuningRequest};
use axum::Json;
use axum::extract::State;
use psf_derive::api_handler;
use psf_domain::constants::TUNING_TAG;
use psf_kernel::server::{ApiError, ApiState};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(tune_handler))
}

#[api_handler(
    post,
    path = "/api/pgtune",
    request_body = TuningRequest,
    responses(
        (status = OK, description = "Recommended postgresql.conf values", body = TuningProfile),
        (status = BAD_REQUEST, description = "Invalid tuning attributes"),
    ),
    tag = TUNING_TAG,
)]
pub(crate) async fn tune_handler(
    State(state): State<ApiState>,
    Json(request): Json<TuningRequest>,
) -> Result<Json<TuningProfile>, ApiError> {
    let slice = state.try_get_slice::<Pgtune>()?;
    let profile = request.or_defaults(&slice.defaults).tune().map_err(to_api_error)?;
    Ok(Json(profile))
}

fn to_api_error(err: TuneError) -> ApiError {
    match err {
        TuneError::InvalidConfiguration { .. } => {
            ApiError::BadRequest { message: err.to_string().into(), context: None }
        },
        other => ApiError::Internal { message: other.to_string().into(), context: None },
    }
}
