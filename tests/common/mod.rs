#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use short_url::routes::build_router;
use short_url::state::{AppState, BasicCredentials};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::time::Duration;
use tower::Layer;

/// `Authorization` value for `admin:secret`.
pub const AUTH: &str = "Basic YWRtaW46c2VjcmV0";

pub const PEER_IP: &str = "127.0.0.1";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(pool, Some(BasicCredentials::new("admin", "secret")), false)
}

/// Full router with a fixed peer address, as the real server would see it.
pub fn make_server(state: AppState) -> TestServer {
    let app = build_router(state, "static").layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (url, code) VALUES ($1, $2) RETURNING id")
        .bind(url)
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_expired_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (url, code, expires_at) VALUES ($1, $2, NOW() - INTERVAL '1 hour') RETURNING id",
    )
    .bind(url)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a link with an explicit creation time, `minutes_ago` in the past.
pub async fn create_link_created_ago(pool: &PgPool, code: &str, minutes_ago: i32) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (url, code, created_at) VALUES ($1, $2, NOW() - make_interval(mins => $3)) RETURNING id",
    )
    .bind(format!("https://example.com/{code}"))
    .bind(code)
    .bind(minutes_ago)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_visit(pool: &PgPool, link_id: i64, ip: &str) {
    sqlx::query("INSERT INTO visits (link_id, ip_address) VALUES ($1, $2)")
        .bind(link_id)
        .bind(ip)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn visits_count(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar("SELECT visits_count FROM links WHERE id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn visit_rows(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_rows(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Waits for background visit accounting to reach `expected` on both the
/// counter and the visit log, returning what was last observed.
pub async fn wait_for_visits(pool: &PgPool, link_id: i64, expected: i64) -> (i64, i64) {
    let mut observed = (0, 0);
    for _ in 0..100 {
        observed = (visits_count(pool, link_id).await, visit_rows(pool, link_id).await);
        if observed == (expected, expected) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    observed
}

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
        let addr: SocketAddr = format!("{PEER_IP}:12345").parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
