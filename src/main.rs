use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shoplens::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        sources::{postgres, MemoryStore, PostgresStore},
        RecommendationService,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shoplens=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let service = match &config.database_url {
        Some(url) => {
            let pool = postgres::create_pool(url, config.db_max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            postgres::run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!(
                max_connections = config.db_max_connections,
                "Using Postgres interaction store"
            );

            let store = Arc::new(PostgresStore::new(pool));
            RecommendationService::new(store.clone(), store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using empty in-memory store");
            let store = Arc::new(MemoryStore::new());
            RecommendationService::new(store.clone(), store)
        }
    };

    let app = create_router(AppState::new(service));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
