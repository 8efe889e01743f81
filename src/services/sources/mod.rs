//! Data sources feeding the recommendation engine
//!
//! The engine only reads: it pulls raw interaction events in bulk from an
//! `InteractionStore` and resolves product metadata through a `ProductCatalog`.
//! Postgres backs production; the in-memory store backs local runs and tests.

use crate::{
    error::AppResult,
    models::{Product, ProductId, ProductLike, ProductPurchase, ProductView},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Bulk read access to recorded interaction events
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InteractionStore: Send + Sync {
    /// Every view event across all users
    async fn all_views(&self) -> AppResult<Vec<ProductView>>;

    /// Every like event across all users
    async fn all_likes(&self) -> AppResult<Vec<ProductLike>>;

    /// Every purchase event across all users
    async fn all_purchases(&self) -> AppResult<Vec<ProductPurchase>>;
}

/// Product metadata lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch a product by id
    ///
    /// Returns `Ok(None)` when the product does not exist (for example it was
    /// deleted after interactions were recorded). Errors are reserved for
    /// failures of the underlying store.
    async fn product_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;
}
