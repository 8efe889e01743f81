use std::collections::{HashMap, HashSet};

use crate::{
    error::AppResult,
    models::{ProductId, ProductLike, ProductPurchase, ProductView, UserId},
    services::sources::InteractionStore,
};

/// All interaction events, read once per request
#[derive(Debug, Clone, Default)]
pub struct InteractionSnapshot {
    pub views: Vec<ProductView>,
    pub likes: Vec<ProductLike>,
    pub purchases: Vec<ProductPurchase>,
}

/// Products a single user viewed, liked and purchased
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserInteractions {
    pub viewed: HashSet<ProductId>,
    pub liked: HashSet<ProductId>,
    pub purchased: HashSet<ProductId>,
}

impl UserInteractions {
    pub fn is_empty(&self) -> bool {
        self.viewed.is_empty() && self.liked.is_empty() && self.purchased.is_empty()
    }
}

impl InteractionSnapshot {
    /// Reads every view, like and purchase from the store
    ///
    /// Any store failure aborts the whole load.
    pub async fn load(store: &dyn InteractionStore) -> AppResult<Self> {
        let (views, likes, purchases) =
            tokio::try_join!(store.all_views(), store.all_likes(), store.all_purchases())?;

        tracing::debug!(
            views = views.len(),
            likes = likes.len(),
            purchases = purchases.len(),
            "Loaded interaction snapshot"
        );

        Ok(Self {
            views,
            likes,
            purchases,
        })
    }

    /// Interaction sets of a single user
    pub fn user(&self, user_id: UserId) -> UserInteractions {
        UserInteractions {
            viewed: self
                .views
                .iter()
                .filter(|v| v.user_id == user_id)
                .map(|v| v.product_id)
                .collect(),
            liked: self
                .likes
                .iter()
                .filter(|l| l.user_id == user_id)
                .map(|l| l.product_id)
                .collect(),
            purchased: self
                .purchases
                .iter()
                .filter(|p| p.user_id == user_id)
                .map(|p| p.product_id)
                .collect(),
        }
    }

    /// Splits the snapshot into the target's sets and everyone else's, grouped by user
    pub fn partition(&self, target: UserId) -> (UserInteractions, HashMap<UserId, UserInteractions>) {
        let mut mine = UserInteractions::default();
        let mut others: HashMap<UserId, UserInteractions> = HashMap::new();

        for view in &self.views {
            if view.user_id == target {
                mine.viewed.insert(view.product_id);
            } else {
                others
                    .entry(view.user_id)
                    .or_default()
                    .viewed
                    .insert(view.product_id);
            }
        }

        for like in &self.likes {
            if like.user_id == target {
                mine.liked.insert(like.product_id);
            } else {
                others
                    .entry(like.user_id)
                    .or_default()
                    .liked
                    .insert(like.product_id);
            }
        }

        for purchase in &self.purchases {
            if purchase.user_id == target {
                mine.purchased.insert(purchase.product_id);
            } else {
                others
                    .entry(purchase.user_id)
                    .or_default()
                    .purchased
                    .insert(purchase.product_id);
            }
        }

        (mine, others)
    }
}

/// Test fixtures for building snapshots without timestamps in the way
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::Utc;

    pub fn view(user_id: UserId, product_id: ProductId) -> ProductView {
        ProductView {
            user_id,
            product_id,
            viewed_at: Utc::now(),
        }
    }

    pub fn like(user_id: UserId, product_id: ProductId) -> ProductLike {
        ProductLike {
            user_id,
            product_id,
            liked_at: Utc::now(),
        }
    }

    pub fn purchase(user_id: UserId, product_id: ProductId) -> ProductPurchase {
        ProductPurchase {
            user_id,
            product_id,
            quantity: 1,
            price_at_purchase: 9.99,
            purchased_at: Utc::now(),
        }
    }
}
