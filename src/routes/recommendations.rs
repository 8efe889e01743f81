use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationResponse, SimilarUsersResponse, UserId},
    routes::AppState,
};

/// `?limit=` query parameter
///
/// Kept as a raw string: anything that does not parse as an integer is treated
/// as absent and the service clamps it to the default instead of rejecting.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    limit: Option<String>,
}

impl LimitQuery {
    pub fn parsed(&self) -> Option<i64> {
        self.limit.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

/// Handler for personalized recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id,
        limit = ?query.parsed(),
        "Processing recommendation request"
    );

    let response = state
        .recommendations
        .get_recommendations(user_id, query.parsed())
        .await?;

    tracing::info!(
        request_id = %request_id,
        algorithm = ?response.algorithm,
        count = response.recommendations.len(),
        "Recommendations generated"
    );

    Ok(Json(response))
}

/// Handler for the similar-users neighbor list
pub async fn similar_users(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<SimilarUsersResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id,
        "Processing similar users request"
    );

    let similar = state
        .recommendations
        .get_similar_users(user_id, query.parsed())
        .await?;

    Ok(Json(SimilarUsersResponse::new(user_id, similar)))
}
