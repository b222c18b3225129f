mod catalog;
mod config;
mod errors;
mod matching;
mod models;
mod questionnaire;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::questionnaire::store::{AnswerStore, InMemoryAnswerStore, RedisAnswerStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Major Match API v{}", env!("CARGO_PKG_VERSION"));

    // Load the major catalog once; it is read-only from here on
    let catalog = match &config.majors_catalog_path {
        Some(path) => Catalog::load_from_path(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin().context("Built-in catalog is invalid")?,
    };

    let answers = build_answer_store(&config).await?;

    let state = AppState {
        catalog: Arc::new(catalog),
        answers,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Redis when `REDIS_URL` is configured, process memory otherwise.
async fn build_answer_store(config: &Config) -> Result<Arc<dyn AnswerStore>> {
    match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            let conn = client
                .get_multiplexed_tokio_connection()
                .await
                .context("Failed to connect to Redis")?;
            info!(
                "Answer store: Redis (session TTL {}s)",
                config.session_ttl_secs
            );
            Ok(Arc::new(RedisAnswerStore::new(conn, config.session_ttl_secs)))
        }
        None => {
            info!("Answer store: in-memory");
            Ok(Arc::new(InMemoryAnswerStore::new()))
        }
    }
}
