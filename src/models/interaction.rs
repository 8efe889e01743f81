use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProductId, UserId};
use crate::services::recommendations::weights::{LIKE_WEIGHT, PURCHASE_WEIGHT, VIEW_WEIGHT};

/// Kind of user/product interaction tracked by the store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    View,
    /// Revocable: a user can unlike a product
    Like,
    /// Irrevocable once recorded
    Purchase,
}

impl InteractionKind {
    /// Contribution of this signal to the combined user similarity
    pub fn weight(self) -> f64 {
        match self {
            InteractionKind::View => VIEW_WEIGHT,
            InteractionKind::Like => LIKE_WEIGHT,
            InteractionKind::Purchase => PURCHASE_WEIGHT,
        }
    }
}

/// A user viewed a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ProductView {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub viewed_at: DateTime<Utc>,
}

/// A user liked a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ProductLike {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub liked_at: DateTime<Utc>,
}

/// A user purchased a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ProductPurchase {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub price_at_purchase: f64,
    pub purchased_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = [
            InteractionKind::View,
            InteractionKind::Like,
            InteractionKind::Purchase,
        ]
        .iter()
        .map(|k| k.weight())
        .sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_purchase_outweighs_like_outweighs_view() {
        assert!(InteractionKind::Purchase.weight() > InteractionKind::Like.weight());
        assert!(InteractionKind::Like.weight() > InteractionKind::View.weight());
    }

    #[test]
    fn test_interaction_kind_serialization() {
        let json = serde_json::to_string(&InteractionKind::Purchase).unwrap();
        assert_eq!(json, "\"purchase\"");
    }
}
