use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{ProductId, RecommendationItem, UserSimilarity},
    services::sources::ProductCatalog,
};

use super::snapshot::{InteractionSnapshot, UserInteractions};
use super::weights::{LIKE_BOOST, PURCHASE_BOOST};

pub const SIMILAR_INTERESTS_REASON: &str = "Users with similar interests liked this";

/// Accumulated score of one candidate product
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub product_id: ProductId,
    pub score: f64,
}

/// Scores products endorsed by the neighborhood
///
/// Each neighbor purchase adds `similarity * PURCHASE_BOOST` unless the target
/// already bought the product; each neighbor like adds `similarity * LIKE_BOOST`
/// unless the target already liked or bought it. Views never contribute here.
/// The result is in first-seen order and unsorted.
pub fn score_candidates(
    target: &UserInteractions,
    neighbors: &[UserSimilarity],
    snapshot: &InteractionSnapshot,
) -> Vec<ScoredCandidate> {
    let mut order: Vec<ProductId> = Vec::new();
    let mut scores: HashMap<ProductId, f64> = HashMap::new();

    let mut add = |product_id: ProductId, amount: f64| {
        let score = scores.entry(product_id).or_insert_with(|| {
            order.push(product_id);
            0.0
        });
        *score += amount;
    };

    for neighbor in neighbors {
        for purchase in snapshot
            .purchases
            .iter()
            .filter(|p| p.user_id == neighbor.user_id)
        {
            if target.purchased.contains(&purchase.product_id) {
                continue;
            }
            add(purchase.product_id, neighbor.similarity_score * PURCHASE_BOOST);
        }
    }

    for neighbor in neighbors {
        for like in snapshot
            .likes
            .iter()
            .filter(|l| l.user_id == neighbor.user_id)
        {
            if target.liked.contains(&like.product_id)
                || target.purchased.contains(&like.product_id)
            {
                continue;
            }
            add(like.product_id, neighbor.similarity_score * LIKE_BOOST);
        }
    }

    order
        .into_iter()
        .map(|product_id| ScoredCandidate {
            product_id,
            score: scores[&product_id],
        })
        .collect()
}

/// Sorts by score descending, breaking ties by ascending product id
pub fn rank(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.product_id.cmp(&b.product_id))
    });
}

/// Scores, ranks and enriches candidates with catalog metadata
///
/// Products the catalog no longer knows are skipped; catalog failures abort.
pub async fn aggregate(
    catalog: &dyn ProductCatalog,
    target: &UserInteractions,
    neighbors: &[UserSimilarity],
    snapshot: &InteractionSnapshot,
    limit: usize,
) -> AppResult<Vec<RecommendationItem>> {
    let mut candidates = score_candidates(target, neighbors, snapshot);
    rank(&mut candidates);

    let mut items = Vec::with_capacity(limit.min(candidates.len()));
    for candidate in candidates {
        if items.len() >= limit {
            break;
        }

        match catalog.product_by_id(candidate.product_id).await? {
            Some(product) => items.push(RecommendationItem::new(
                product,
                candidate.score,
                SIMILAR_INTERESTS_REASON.to_string(),
            )),
            None => {
                tracing::debug!(
                    product_id = candidate.product_id,
                    "Skipping candidate missing from catalog"
                );
            }
        }
    }

    Ok(items)
}
