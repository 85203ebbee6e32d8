use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use valuator_core::valuations::{TestCalculation, ValuationInput, ValuationResult};

async fn create_valuation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ValuationInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ValuationResult>)> {
    let Json(input) = payload?;
    let result = state.valuation_service.create_valuation(input).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

async fn get_valuation(
    Path(company_name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ValuationResult>> {
    state
        .valuation_service
        .get_valuation(&company_name)?
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!("Valuation not found for company: {}", company_name))
        })
}

async fn test_calculation(State(state): State<Arc<AppState>>) -> ApiResult<Json<TestCalculation>> {
    let calculation = state.valuation_service.run_test_calculation()?;
    Ok(Json(calculation))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/valuations", post(create_valuation))
        .route("/valuations/test-calculation", get(test_calculation))
        .route("/valuations/{company_name}", get(get_valuation))
}
