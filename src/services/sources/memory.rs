use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Product, ProductId, ProductLike, ProductPurchase, ProductView, UserId},
    services::sources::{InteractionStore, ProductCatalog},
};

/// In-process interaction store and catalog
///
/// Backs local runs without a database and the integration tests. Clones share
/// the same underlying data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    products: HashMap<ProductId, Product>,
    views: Vec<ProductView>,
    likes: Vec<ProductLike>,
    purchases: Vec<ProductPurchase>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product in the catalog
    pub async fn insert_product(&self, product: Product) {
        let mut inner = self.inner.write().await;
        inner.products.insert(product.id, product);
    }

    /// Deletes a product from the catalog, leaving its interactions in place
    pub async fn remove_product(&self, product_id: ProductId) -> Option<Product> {
        let mut inner = self.inner.write().await;
        inner.products.remove(&product_id)
    }

    pub async fn record_view(&self, user_id: UserId, product_id: ProductId) {
        let mut inner = self.inner.write().await;
        inner.views.push(ProductView {
            user_id,
            product_id,
            viewed_at: Utc::now(),
        });
    }

    /// Records a like; liking an already liked product is a no-op
    pub async fn record_like(&self, user_id: UserId, product_id: ProductId) {
        let mut inner = self.inner.write().await;
        let exists = inner
            .likes
            .iter()
            .any(|l| l.user_id == user_id && l.product_id == product_id);
        if exists {
            return;
        }

        inner.likes.push(ProductLike {
            user_id,
            product_id,
            liked_at: Utc::now(),
        });
    }

    /// Revokes a like
    pub async fn remove_like(&self, user_id: UserId, product_id: ProductId) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.likes.len();
        inner
            .likes
            .retain(|l| !(l.user_id == user_id && l.product_id == product_id));

        if inner.likes.len() == before {
            return Err(AppError::NotFound(format!(
                "like by user {} on product {}",
                user_id, product_id
            )));
        }
        Ok(())
    }

    pub async fn record_purchase(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
        price_at_purchase: f64,
    ) -> AppResult<()> {
        if quantity <= 0 {
            return Err(AppError::InvalidInput(
                "quantity must be greater than 0".to_string(),
            ));
        }

        let mut inner = self.inner.write().await;
        inner.purchases.push(ProductPurchase {
            user_id,
            product_id,
            quantity,
            price_at_purchase,
            purchased_at: Utc::now(),
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl InteractionStore for MemoryStore {
    async fn all_views(&self) -> AppResult<Vec<ProductView>> {
        Ok(self.inner.read().await.views.clone())
    }

    async fn all_likes(&self) -> AppResult<Vec<ProductLike>> {
        Ok(self.inner.read().await.likes.clone())
    }

    async fn all_purchases(&self) -> AppResult<Vec<ProductPurchase>> {
        Ok(self.inner.read().await.purchases.clone())
    }
}

#[async_trait::async_trait]
impl ProductCatalog for MemoryStore {
    async fn product_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }
}
