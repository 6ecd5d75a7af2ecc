mod common;

use axum::http::StatusCode;
use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use short_url::api::handlers::redirect_handler;
use sqlx::PgPool;

/// Mounts the redirect route alone, without the admin surface.
fn redirect_server(pool: PgPool) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(common::create_test_state(pool))
        .layer(common::MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_link(&pool, "redir1", "https://example.com/target").await;
    let server = redirect_server(pool);

    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = redirect_server(pool.clone());

    let response = server.get("/nope12").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "url not found");

    let visits: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(visits, 0);
}

#[sqlx::test]
async fn test_redirect_records_visit(pool: PgPool) {
    let id = common::create_test_link(&pool, "count1", "https://example.com").await;
    let server = redirect_server(pool.clone());

    server
        .get("/count1")
        .add_header("User-Agent", "TestBot/1.0")
        .add_header("Referer", "https://ref.example/page")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    assert_eq!(common::wait_for_visits(&pool, id, 1).await, (1, 1));

    let (ip, user_agent, referrer): (String, String, String) = sqlx::query_as(
        "SELECT ip_address, user_agent, referrer FROM visits WHERE link_id = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(ip, common::PEER_IP);
    assert_eq!(user_agent, "TestBot/1.0");
    assert_eq!(referrer, "https://ref.example/page");
}

#[sqlx::test]
async fn test_redirect_without_headers_records_empty_fields(pool: PgPool) {
    let id = common::create_test_link(&pool, "bare1", "https://example.com").await;
    let server = redirect_server(pool.clone());

    server
        .get("/bare1")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    assert_eq!(common::wait_for_visits(&pool, id, 1).await, (1, 1));

    let (user_agent, referrer): (String, String) =
        sqlx::query_as("SELECT user_agent, referrer FROM visits WHERE link_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(user_agent, "");
    assert_eq!(referrer, "");
}

#[sqlx::test]
async fn test_repeated_redirects_count_each_hit(pool: PgPool) {
    let id = common::create_test_link(&pool, "multi", "https://example.com").await;
    let server = redirect_server(pool.clone());

    for _ in 0..3 {
        server
            .get("/multi")
            .await
            .assert_status(StatusCode::TEMPORARY_REDIRECT);
    }

    assert_eq!(common::wait_for_visits(&pool, id, 3).await, (3, 3));
}

#[sqlx::test]
async fn test_expired_link_still_redirects(pool: PgPool) {
    common::create_expired_link(&pool, "old1", "https://example.com/old").await;
    let server = redirect_server(pool);

    let response = server.get("/old1").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/old");
}

#[sqlx::test]
async fn test_create_redirect_conflict_scenario(pool: PgPool) {
    let server = common::make_server(common::create_test_state(pool.clone()));
    let request = json!({ "url": "https://example.com", "custom_alias": "abc123" });

    let created = server
        .post("/api/generate")
        .add_header("Authorization", common::AUTH)
        .json(&request)
        .await;
    created.assert_status(StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["data"]["code"], "abc123");
    assert_eq!(body["data"]["visits_count"], 0);
    let id = body["data"]["id"].as_i64().unwrap();

    let redirect = server.get("/abc123").await;
    assert_eq!(redirect.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(redirect.header("location"), "https://example.com");

    assert_eq!(common::wait_for_visits(&pool, id, 1).await, (1, 1));

    let again = server
        .post("/api/generate")
        .add_header("Authorization", common::AUTH)
        .json(&request)
        .await;
    again.assert_status_bad_request();
    let body: Value = again.json();
    assert_eq!(body["code"], "alias_conflict");
}

#[sqlx::test]
async fn test_drain_completes_pending_accounting(pool: PgPool) {
    let id = common::create_test_link(&pool, "drain1", "https://example.com").await;
    let state = common::create_test_state(pool.clone());
    let server = common::make_server(state.clone());

    for _ in 0..5 {
        server
            .get("/drain1")
            .await
            .assert_status(StatusCode::TEMPORARY_REDIRECT);
    }

    state.drain_accounting().await;

    assert!(state.accounting.is_empty());
    assert_eq!(common::visits_count(&pool, id).await, 5);
    assert_eq!(common::visit_rows(&pool, id).await, 5);
}
