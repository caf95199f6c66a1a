use medsim_core::Recommendation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub medicine_name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendResponse {
    pub medicine_searched: String,
    pub recommended_medicines: Vec<String>,
}

impl From<Recommendation> for RecommendResponse {
    fn from(result: Recommendation) -> Self {
        Self {
            medicine_searched: result.resolved_name,
            recommended_medicines: result.recommendations,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub items: usize,
}
