use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::cost::CostEstimate;
use crate::models::{RegionDescriptor, WeatherObservation};
use crate::service::{RegionCost, RegionCostService};

pub type AppState = Arc<RegionCostService>;

/// Body of `POST /estimate`
#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub weather: WeatherObservation,
    pub region: RegionDescriptor,
}

pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/regions", get(get_regions))
        .route("/regions/{id}/cost", get(get_region_cost))
        .route("/costs", get(get_costs))
        .route("/estimate", post(post_estimate))
        .with_state(service)
}

async fn get_regions(State(service): State<AppState>) -> Result<Json<Vec<RegionDescriptor>>, StatusCode> {
    Ok(Json(service.regions().await))
}

async fn get_region_cost(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RegionCost>, StatusCode> {
    service
        .region_cost(&id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_costs(State(service): State<AppState>) -> Result<Json<Vec<RegionCost>>, StatusCode> {
    Ok(Json(service.all_costs().await))
}

async fn post_estimate(
    State(service): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<CostEstimate>, StatusCode> {
    Ok(Json(service.estimate(&request.weather, &request.region)))
}
