//! Integration tests for the dashboard router.
//!
//! Covers: open routes (/healthz, /docs), 401 on /api without or with a wrong
//! key, and authorized reads of applications and stats.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use flyzex_storage::GuildStore;
use flyzex_webapp::{router, DashboardState};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_KEY: &str = "test-admin-key";

async fn state_with_data(dir: &TempDir) -> Arc<DashboardState> {
    let store = Arc::new(GuildStore::new(dir.path().join("storage.json"), None));
    store
        .add_application("u42", "Eve", Some("eve"), "I love & support", Some("en"), Vec::new())
        .await
        .unwrap();
    store.add_xp("g1", "u42", 150, Some("Eve"), None).await.unwrap();
    Arc::new(DashboardState {
        store,
        admin_key: ADMIN_KEY.to_string(),
    })
}

fn get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {key}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// **Test: Liveness and docs need no credentials.**
///
/// **Setup:** Router over an empty store.
/// **Action:** GET /healthz and GET /docs without a key.
/// **Expected:** Both respond 200.
#[tokio::test]
async fn open_routes_do_not_require_auth() {
    let dir = TempDir::new().unwrap();
    let app = router(state_with_data(&dir).await);

    let health = app.clone().oneshot(get("/healthz", None)).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let docs = app.oneshot(get("/docs", None)).await.unwrap();
    assert_eq!(docs.status(), StatusCode::OK);
}

/// **Test: API routes reject a missing or wrong admin key.**
///
/// **Setup:** Router with admin key configured.
/// **Action:** GET /api/applications with no key, then a wrong key.
/// **Expected:** 401 both times, with a WWW-Authenticate challenge.
#[tokio::test]
async fn api_rejects_bad_credentials() {
    let dir = TempDir::new().unwrap();
    let app = router(state_with_data(&dir).await);

    let missing = app
        .clone()
        .oneshot(get("/api/applications", None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert!(missing.headers().contains_key(header::WWW_AUTHENTICATE));

    let wrong = app
        .oneshot(get("/api/applications", Some("nope")))
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
}

/// **Test: An authorized client reads pending applications and stats.**
///
/// **Setup:** Store with one pending application and some XP.
/// **Action:** GET /api/applications, /api/stats, /api/leaderboard/g1 with the key.
/// **Expected:** 200 responses whose JSON carries the stored data.
#[tokio::test]
async fn api_serves_store_projections() {
    let dir = TempDir::new().unwrap();
    let app = router(state_with_data(&dir).await);

    let response = app
        .clone()
        .oneshot(get("/api/applications", Some(ADMIN_KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["pending"][0]["user_id"], "u42");
    assert_eq!(json["pending"][0]["full_name"], "Eve");

    let stats = app
        .clone()
        .oneshot(get("/api/stats", Some(ADMIN_KEY)))
        .await
        .unwrap();
    assert_eq!(stats.status(), StatusCode::OK);
    let body = stats.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["pending"], 1);

    let board = app
        .oneshot(get("/api/leaderboard/g1?limit=5", Some(ADMIN_KEY)))
        .await
        .unwrap();
    assert_eq!(board.status(), StatusCode::OK);
    let body = board.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["leaderboard"][0]["user_id"], "u42");
    assert_eq!(json["leaderboard"][0]["xp"], 150);

    let missing = router(state_with_data(&TempDir::new().unwrap()).await)
        .oneshot(get("/api/applications/unknown", Some(ADMIN_KEY)))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
