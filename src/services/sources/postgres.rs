use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    error::AppResult,
    models::{Product, ProductId, ProductLike, ProductPurchase, ProductView},
    services::sources::{InteractionStore, ProductCatalog},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Postgres-backed interaction store and product catalog
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl InteractionStore for PostgresStore {
    async fn all_views(&self) -> AppResult<Vec<ProductView>> {
        let views = sqlx::query_as::<_, ProductView>(
            r#"
            SELECT user_id, product_id, viewed_at
            FROM user_product_views
            ORDER BY viewed_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = views.len(), "Loaded all views");
        Ok(views)
    }

    async fn all_likes(&self) -> AppResult<Vec<ProductLike>> {
        let likes = sqlx::query_as::<_, ProductLike>(
            r#"
            SELECT user_id, product_id, liked_at
            FROM user_product_likes
            ORDER BY liked_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = likes.len(), "Loaded all likes");
        Ok(likes)
    }

    async fn all_purchases(&self) -> AppResult<Vec<ProductPurchase>> {
        let purchases = sqlx::query_as::<_, ProductPurchase>(
            r#"
            SELECT user_id, product_id, quantity, price_at_purchase, purchased_at
            FROM user_product_purchases
            ORDER BY purchased_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = purchases.len(), "Loaded all purchases");
        Ok(purchases)
    }
}

#[async_trait::async_trait]
impl ProductCatalog for PostgresStore {
    async fn product_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category_id, price
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }
}
