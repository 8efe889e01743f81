use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{ProductId, ProductLike, RecommendationItem},
    services::sources::ProductCatalog,
};

/// Global like count of one product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeCount {
    pub product_id: ProductId,
    pub count: usize,
}

/// Counts likes per product across all users, most liked first
///
/// Ties are broken by ascending product id.
pub fn count_likes(likes: &[ProductLike]) -> Vec<LikeCount> {
    let mut counts: HashMap<ProductId, usize> = HashMap::new();
    for like in likes {
        *counts.entry(like.product_id).or_insert(0) += 1;
    }

    let mut ranked: Vec<LikeCount> = counts
        .into_iter()
        .map(|(product_id, count)| LikeCount { product_id, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.product_id.cmp(&b.product_id)));
    ranked
}

fn popular_reason(count: usize) -> String {
    format!("Popular choice - {} users liked this", count)
}

/// Most liked products, scored relative to the top entry
///
/// Products missing from the catalog are skipped before the limit is applied,
/// so the first returned item always scores exactly 1.0. No likes at all
/// yields an empty list.
pub async fn popular_products(
    catalog: &dyn ProductCatalog,
    likes: &[ProductLike],
    limit: usize,
) -> AppResult<Vec<RecommendationItem>> {
    let ranked = count_likes(likes);

    let mut items: Vec<RecommendationItem> = Vec::with_capacity(limit.min(ranked.len()));
    let mut max_count = 0;

    for entry in ranked {
        if items.len() >= limit {
            break;
        }

        let Some(product) = catalog.product_by_id(entry.product_id).await? else {
            tracing::debug!(
                product_id = entry.product_id,
                "Skipping popular product missing from catalog"
            );
            continue;
        };

        if items.is_empty() {
            max_count = entry.count;
        }

        let score = entry.count as f64 / max_count as f64;
        items.push(RecommendationItem::new(
            product,
            score,
            popular_reason(entry.count),
        ));
    }

    Ok(items)
}
