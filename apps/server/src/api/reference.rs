use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use valuator_core::reference::{
    ConcentrationAdjustment, CountryAdjustment, FxRate, SectorMetric, SizeAdjustment,
};

async fn list_fx_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<FxRate>>> {
    Ok(Json(state.reference_service.get_fx_rates()?))
}

async fn list_sectors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SectorMetric>>> {
    Ok(Json(state.reference_service.get_sector_metrics()?))
}

async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CountryAdjustment>>> {
    Ok(Json(state.reference_service.get_country_adjustments()?))
}

async fn list_size_adjustments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SizeAdjustment>>> {
    Ok(Json(state.reference_service.get_size_adjustments()?))
}

async fn list_concentration_adjustments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ConcentrationAdjustment>>> {
    Ok(Json(state.reference_service.get_concentration_adjustments()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reference/fx-rates", get(list_fx_rates))
        .route("/reference/sectors", get(list_sectors))
        .route("/reference/countries", get(list_countries))
        .route("/reference/size-adjustments", get(list_size_adjustments))
        .route(
            "/reference/concentration-adjustments",
            get(list_concentration_adjustments),
        )
}
