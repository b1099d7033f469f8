//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, rate limit store selection, worker spawning,
//! and the Axum server lifecycle.

use crate::application::services::{ClickRecorder, LinkService, RateLimiter, RedirectService};
use crate::config::{Config, RateLimitBackend};
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::{ClickRepository, LinkRepository, RateLimitStore};
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::infrastructure::rate_limit::{MemoryRateLimitStore, RedisRateLimitStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// How long the click worker may take to drain after the server stops.
const CLICK_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Rate limit store (Redis, or in-process when configured)
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migrations fail
/// - The rate limit store is unreachable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let rate_store = connect_rate_limit_store(&config).await?;

    let pool = Arc::new(pool);
    let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let clicks: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool.clone()));

    let (recorder, click_rx) = ClickRecorder::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        clicks,
        config.click_worker_concurrency,
    ));
    info!(
        concurrency = config.click_worker_concurrency,
        "Click worker started"
    );

    let state = build_state(&config, links, rate_store, recorder)?;
    let app = app_router(state, &config.cors_origin);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router owned the last click sender; dropping it closes the queue.
    info!("Server stopped, draining click queue");
    match tokio::time::timeout(CLICK_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "Click worker panicked"),
        Err(_) => warn!(
            "Click worker did not drain within {}s",
            CLICK_DRAIN_TIMEOUT.as_secs()
        ),
    }

    pool.close().await;
    info!("Shutdown complete");

    Ok(())
}

/// Wires repositories and the rate limit store into application services.
///
/// # Errors
///
/// Returns an error if the short code settings are invalid.
pub fn build_state(
    config: &Config,
    links: Arc<dyn LinkRepository>,
    rate_store: Arc<dyn RateLimitStore>,
    recorder: ClickRecorder,
) -> Result<AppState> {
    let generator = RandomCodeGenerator::new(config.short_code_length, &config.short_code_alphabet)
        .context("Invalid short code settings")?;

    let rate_limiter = Arc::new(RateLimiter::new(
        rate_store,
        config.rate_limit_max,
        Duration::from_secs(config.rate_limit_window_secs),
    ));

    let link_service = Arc::new(LinkService::new(
        links.clone(),
        Arc::new(generator),
        rate_limiter.clone(),
        config.base_url.clone(),
        config.short_code_max_attempts,
    ));

    let redirect_service = Arc::new(RedirectService::new(
        links,
        recorder,
        config.ip_hash_secret.clone(),
    ));

    Ok(AppState::new(
        link_service,
        redirect_service,
        rate_limiter,
        config.behind_proxy,
    ))
}

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

async fn connect_rate_limit_store(config: &Config) -> Result<Arc<dyn RateLimitStore>> {
    match (config.rate_limit_backend, &config.redis_url) {
        (RateLimitBackend::Redis, Some(redis_url)) => {
            let store = RedisRateLimitStore::connect(redis_url)
                .await
                .context("Failed to connect to Redis rate limit store")?;
            Ok(Arc::new(store))
        }
        (RateLimitBackend::Redis, None) => {
            anyhow::bail!("RATE_LIMIT_BACKEND=redis requires REDIS_URL or REDIS_HOST")
        }
        (RateLimitBackend::Memory, _) => {
            warn!("Using in-process rate limit counters; limits are per instance");
            Ok(Arc::new(MemoryRateLimitStore::new()))
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
