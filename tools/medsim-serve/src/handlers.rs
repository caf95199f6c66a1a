use axum::{Json, extract::State};

use crate::AppState;
use crate::dto::{HealthResponse, RecommendRequest, RecommendResponse};
use crate::error::ApiError;

pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let result = state.recommender.handle(&request.medicine_name)?;
    tracing::info!(
        query = %request.medicine_name,
        resolved = %result.resolved_name,
        count = result.recommendations.len(),
        "recommended"
    );
    Ok(Json(result.into()))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        items: state.recommender.len(),
    })
}
