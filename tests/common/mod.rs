#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tower::Layer;

use linkmint::application::services::{ClickRecorder, LinkService, RateLimiter, RedirectService};
use linkmint::domain::click_worker::run_click_worker;
use linkmint::domain::entities::{Click, NewClick};
use linkmint::domain::rate_limit::WindowHit;
use linkmint::domain::repositories::{ClickRepository, LinkRepository, RateLimitStore};
use linkmint::error::AppError;
use linkmint::infrastructure::memory::{MemoryClickRepository, MemoryLinkRepository, MemoryStore};
use linkmint::infrastructure::rate_limit::MemoryRateLimitStore;
use linkmint::routes;
use linkmint::state::AppState;
use linkmint::utils::code_generator::RandomCodeGenerator;

pub const BASE_URL: &str = "http://localhost:3001";
pub const CORS_ORIGIN: &str = "http://localhost:5173";

/// Injects a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Click store that blocks every insert until the test opens the gate.
pub struct GatedClickRepository {
    inner: MemoryClickRepository,
    gate: Arc<Semaphore>,
}

impl GatedClickRepository {
    pub fn new(store: Arc<MemoryStore>) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        (
            Self {
                inner: MemoryClickRepository::new(store),
                gate: gate.clone(),
            },
            gate,
        )
    }
}

#[async_trait]
impl ClickRepository for GatedClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| AppError::internal(e.to_string(), serde_json::Value::Null))?;
        self.inner.record_click(new_click).await
    }
}

/// Rate limit store that is always unreachable.
pub struct UnreachableRateLimitStore;

#[async_trait]
impl RateLimitStore for UnreachableRateLimitStore {
    async fn hit(&self, _key: &str, _window: Duration) -> Result<WindowHit, AppError> {
        Err(AppError::internal(
            "Rate limit store error",
            serde_json::json!({ "reason": "connection refused" }),
        ))
    }

    async fn reset(&self, _key: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub struct TestOptions {
    pub rate_limit_max: u64,
    pub behind_proxy: bool,
    pub queue_capacity: usize,
    pub clicks: Option<Arc<dyn ClickRepository>>,
    pub rate_store: Option<Arc<dyn RateLimitStore>>,
    pub store: Option<Arc<MemoryStore>>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            rate_limit_max: 20,
            behind_proxy: false,
            queue_capacity: 100,
            clicks: None,
            rate_store: None,
            store: None,
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

/// Builds the full router over in-memory stores with a running click worker.
pub fn spawn_app(options: TestOptions) -> TestApp {
    let store = options.store.unwrap_or_else(MemoryStore::new);

    let links: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new(store.clone()));
    let clicks = options
        .clicks
        .unwrap_or_else(|| Arc::new(MemoryClickRepository::new(store.clone())));
    let rate_store = options
        .rate_store
        .unwrap_or_else(|| Arc::new(MemoryRateLimitStore::new()));

    let (recorder, click_rx) = ClickRecorder::channel(options.queue_capacity);
    tokio::spawn(run_click_worker(click_rx, clicks, 4));

    let rate_limiter = Arc::new(RateLimiter::new(
        rate_store,
        options.rate_limit_max,
        Duration::from_secs(900),
    ));

    let link_service = Arc::new(LinkService::new(
        links.clone(),
        Arc::new(RandomCodeGenerator::default()),
        rate_limiter.clone(),
        BASE_URL,
        5,
    ));
    let redirect_service = Arc::new(RedirectService::new(links, recorder, None));

    let state = AppState::new(
        link_service,
        redirect_service,
        rate_limiter,
        options.behind_proxy,
    );

    let app = routes::router(state, CORS_ORIGIN).layer(MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    TestApp { server, store }
}

/// Waits until `link_id` has at least `expected` clicks stored.
pub async fn wait_for_clicks(store: &MemoryStore, link_id: i64, expected: usize) -> bool {
    for _ in 0..200 {
        if store.click_count(link_id) >= expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
}

/// Inserts a link row directly and returns its id.
pub async fn create_test_link(pool: &sqlx::PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (short_code, original_url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Builds a click for `link_id` with a fixed client hash.
pub fn new_click(link_id: i64) -> NewClick {
    NewClick {
        link_id,
        clicked_at: chrono::Utc::now(),
        ip_hash: linkmint::utils::client_ip::hash_ip("192.0.2.1".parse().ok(), None),
        user_agent: Some("Mozilla/5.0".to_string()),
        referer: None,
    }
}
