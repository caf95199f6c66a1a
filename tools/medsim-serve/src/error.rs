use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medsim_core::MedsimError;

use crate::dto::ErrorResponse;

/// Body detail for queries that resolve to nothing.
pub const NOT_FOUND_DETAIL: &str = "No similar medicine found";

/// A request-level failure, rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError(pub MedsimError);

impl From<MedsimError> for ApiError {
    fn from(err: MedsimError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = if self.0.is_not_found() {
            (StatusCode::NOT_FOUND, NOT_FOUND_DETAIL.to_string())
        } else {
            tracing::error!(err = %self.0, "internal recommender fault");
            (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}
