use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{ProductId, UserId, UserSimilarity};

use super::snapshot::{InteractionSnapshot, UserInteractions};
use super::weights::{LIKE_WEIGHT, MIN_SIMILARITY, PURCHASE_WEIGHT, VIEW_WEIGHT};

/// Overlap of one interaction type between two users
#[derive(Debug, Clone, Copy, PartialEq)]
struct Overlap {
    common: usize,
    jaccard: f64,
}

/// Jaccard index |A ∩ B| / |A ∪ B|, or 0 when both sets are empty
fn overlap(target: &HashSet<ProductId>, other: &HashSet<ProductId>) -> Overlap {
    let common = target.iter().filter(|id| other.contains(id)).count();
    let union = target.len() + other.len() - common;

    let jaccard = if union > 0 {
        common as f64 / union as f64
    } else {
        0.0
    };

    Overlap { common, jaccard }
}

/// Scores `other` against `target`
///
/// Returns `None` when the users share no product across any interaction
/// type, or when the combined score falls below `MIN_SIMILARITY`.
pub fn score_pair(
    target: &UserInteractions,
    other_id: UserId,
    other: &UserInteractions,
) -> Option<UserSimilarity> {
    let purchases = overlap(&target.purchased, &other.purchased);
    let likes = overlap(&target.liked, &other.liked);
    let views = overlap(&target.viewed, &other.viewed);

    if purchases.common == 0 && likes.common == 0 && views.common == 0 {
        return None;
    }

    let score = purchases.jaccard * PURCHASE_WEIGHT
        + likes.jaccard * LIKE_WEIGHT
        + views.jaccard * VIEW_WEIGHT;

    if score < MIN_SIMILARITY {
        return None;
    }

    Some(UserSimilarity {
        user_id: other_id,
        similarity_score: score,
        common_likes: likes.common,
        common_views: views.common,
    })
}

/// Ranks every other user by weighted-Jaccard similarity to `target`
///
/// Ties are broken by ascending user id so results are deterministic.
pub fn find_similar_users(
    snapshot: &InteractionSnapshot,
    target: UserId,
    limit: usize,
) -> Vec<UserSimilarity> {
    let (mine, others) = snapshot.partition(target);

    if mine.is_empty() {
        return Vec::new();
    }

    let mut similar: Vec<UserSimilarity> = others
        .iter()
        .filter_map(|(id, theirs)| score_pair(&mine, *id, theirs))
        .collect();

    similar.sort_by(|a, b| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(Ordering::Equal)
            .then(a.user_id.cmp(&b.user_id))
    });
    similar.truncate(limit);

    tracing::debug!(
        target_user = target,
        candidates = others.len(),
        neighbors = similar.len(),
        "Computed user similarities"
    );

    similar
}
