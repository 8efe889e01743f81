use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::instrument;

use crate::{
    error::AppResult,
    models::{Algorithm, RecommendationItem, RecommendationResponse, UserId, UserSimilarity},
    services::sources::{InteractionStore, ProductCatalog},
};

pub mod candidates;
pub mod popularity;
pub mod similarity;
pub mod snapshot;
pub mod weights;

use snapshot::InteractionSnapshot;
use weights::{clamp_limit, NEIGHBOR_LIMIT};

/// User-based collaborative filtering over view, like and purchase events
///
/// Stateless: every call re-reads all interaction events from the store and
/// keeps nothing between calls. When no personalization signal exists (no
/// interactions, no similar users, or nothing left after filtering) the
/// response falls back to the globally most liked products.
pub struct RecommendationService {
    interactions: Arc<dyn InteractionStore>,
    catalog: Arc<dyn ProductCatalog>,
}

impl RecommendationService {
    pub fn new(interactions: Arc<dyn InteractionStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self {
            interactions,
            catalog,
        }
    }

    /// Generates product recommendations for a user
    ///
    /// `limit` outside `1..=50` (or absent) is treated as 10.
    #[instrument(skip(self))]
    pub async fn get_recommendations(
        &self,
        user_id: UserId,
        limit: Option<i64>,
    ) -> AppResult<RecommendationResponse> {
        let limit = clamp_limit(limit);
        let snapshot = InteractionSnapshot::load(self.interactions.as_ref()).await?;

        let target = snapshot.user(user_id);
        if target.is_empty() {
            tracing::info!(user_id, "No interactions, using popularity fallback");
            return self.popularity_fallback(user_id, &snapshot, limit).await;
        }

        let neighbors = similarity::find_similar_users(&snapshot, user_id, NEIGHBOR_LIMIT);
        if neighbors.is_empty() {
            tracing::info!(user_id, "No similar users, using popularity fallback");
            return self.popularity_fallback(user_id, &snapshot, limit).await;
        }

        let recommendations =
            candidates::aggregate(self.catalog.as_ref(), &target, &neighbors, &snapshot, limit)
                .await?;
        if recommendations.is_empty() {
            tracing::info!(
                user_id,
                neighbor_count = neighbors.len(),
                "No candidates after filtering, using popularity fallback"
            );
            return self.popularity_fallback(user_id, &snapshot, limit).await;
        }

        tracing::info!(
            user_id,
            neighbor_count = neighbors.len(),
            candidate_count = recommendations.len(),
            "Generated collaborative recommendations"
        );

        Ok(respond(
            user_id,
            recommendations,
            Algorithm::CollaborativeFiltering,
        ))
    }

    /// Finds users with interaction patterns similar to `user_id`
    #[instrument(skip(self))]
    pub async fn get_similar_users(
        &self,
        user_id: UserId,
        limit: Option<i64>,
    ) -> AppResult<Vec<UserSimilarity>> {
        let limit = clamp_limit(limit);
        let snapshot = InteractionSnapshot::load(self.interactions.as_ref()).await?;

        let similar = similarity::find_similar_users(&snapshot, user_id, limit);
        tracing::info!(user_id, count = similar.len(), "Found similar users");

        Ok(similar)
    }

    async fn popularity_fallback(
        &self,
        user_id: UserId,
        snapshot: &InteractionSnapshot,
        limit: usize,
    ) -> AppResult<RecommendationResponse> {
        let recommendations =
            popularity::popular_products(self.catalog.as_ref(), &snapshot.likes, limit).await?;

        tracing::debug!(
            user_id,
            count = recommendations.len(),
            "Built popularity recommendations"
        );

        Ok(respond(user_id, recommendations, Algorithm::PopularityBased))
    }
}

fn respond(
    user_id: UserId,
    recommendations: Vec<RecommendationItem>,
    algorithm: Algorithm,
) -> RecommendationResponse {
    RecommendationResponse {
        user_id,
        recommendations,
        algorithm,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}
