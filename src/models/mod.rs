use serde::{Deserialize, Serialize};

mod interaction;

pub use interaction::{InteractionKind, ProductLike, ProductPurchase, ProductView};

/// Identifier of a user account
pub type UserId = i64;

/// Identifier of a catalog product
pub type ProductId = i64;

// ============================================================================
// Catalog Types
// ============================================================================

/// Product metadata as exposed by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: Option<ProductId>,
    pub price: f64,
}

// ============================================================================
// Recommendation Types
// ============================================================================

/// Which pipeline produced a recommendation list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Neighborhood of similar users produced the list
    CollaborativeFiltering,
    /// Cold start: products ranked by global like count
    PopularityBased,
}

/// A single recommended product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub product_id: ProductId,
    pub product_name: String,
    /// 0 when the product has no category
    pub category_id: ProductId,
    pub price: f64,
    pub score: f64,
    pub reason: String,
}

impl RecommendationItem {
    pub fn new(product: Product, score: f64, reason: String) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name,
            category_id: product.category_id.unwrap_or(0),
            price: product.price,
            score,
            reason,
        }
    }
}

/// Response returned to recommendation callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub user_id: UserId,
    pub recommendations: Vec<RecommendationItem>,
    pub algorithm: Algorithm,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

/// Similarity between the target user and one neighbor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSimilarity {
    pub user_id: UserId,
    pub similarity_score: f64,
    pub common_likes: usize,
    pub common_views: usize,
}

/// Neighbor list wrapper returned by the similar-users endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarUsersResponse {
    pub user_id: UserId,
    pub similar_users: Vec<UserSimilarity>,
    pub count: usize,
}

impl SimilarUsersResponse {
    pub fn new(user_id: UserId, similar_users: Vec<UserSimilarity>) -> Self {
        Self {
            user_id,
            count: similar_users.len(),
            similar_users,
        }
    }
}
