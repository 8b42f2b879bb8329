//! Admin dashboard: read-only JSON views over the guild store, served next
//! to the bot dispatcher. Every `/api` route requires
//! `Authorization: Bearer <ADMIN_API_KEY>`; `/docs` describes the surface.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::info;

use flyzex_storage::{ApplicationStatus, GuildStore};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("bind failed on {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

pub struct DashboardState {
    pub store: Arc<GuildStore>,
    pub admin_key: String,
}

const DOCS_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>FlyzexBot dashboard</title>
  <style>
    body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 46rem; color: #222; }
    code { background: #f2f2f2; padding: 0.1rem 0.3rem; border-radius: 4px; }
    li { margin: 0.4rem 0; }
  </style>
</head>
<body>
  <h1>FlyzexBot dashboard</h1>
  <p>All <code>/api</code> routes require <code>Authorization: Bearer &lt;ADMIN_API_KEY&gt;</code>.</p>
  <ul>
    <li><code>GET /healthz</code> — liveness, no auth</li>
    <li><code>GET /api/applications</code> — pending applications</li>
    <li><code>GET /api/applications/{user_id}</code> — one pending application</li>
    <li><code>GET /api/members</code> — approved members with decision timestamps</li>
    <li><code>GET /api/admins</code> — the admin roster</li>
    <li><code>GET /api/stats</code> — application pipeline statistics</li>
    <li><code>GET /api/leaderboard/{chat_id}?limit=N</code> — XP leaderboard of a chat</li>
  </ul>
</body>
</html>
"#;

/// Builds the dashboard router.
pub fn router(state: Arc<DashboardState>) -> Router {
    let api = Router::new()
        .route("/applications", get(list_applications))
        .route("/applications/{user_id}", get(get_application))
        .route("/members", get(list_members))
        .route("/admins", get(list_admins))
        .route("/stats", get(get_stats))
        .route("/leaderboard/{chat_id}", get(get_leaderboard))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_admin_key,
        ));

    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/docs", get(docs))
        .nest("/api", api)
        .with_state(state)
}

/// Binds and serves until the task is aborted.
pub async fn serve(
    state: Arc<DashboardState>,
    host: &str,
    port: u16,
) -> Result<(), DashboardError> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| DashboardError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "dashboard listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn require_admin_key(
    State(state): State<Arc<DashboardState>>,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    match presented {
        Some(key) if constant_time_eq(key.as_bytes(), state.admin_key.as_bytes()) => {
            next.run(request).await
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(json!({"error": "missing or invalid admin key"})),
        )
            .into_response(),
    }
}

/// Length-constant comparison so the admin key cannot be probed byte by byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "service": "flyzexbot-dashboard",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/docs",
    }))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn docs() -> Html<&'static str> {
    Html(DOCS_HTML)
}

async fn list_applications(State(state): State<Arc<DashboardState>>) -> Json<serde_json::Value> {
    let pending = state.store.pending_applications().await;
    Json(json!({ "pending": pending }))
}

async fn get_application(
    State(state): State<Arc<DashboardState>>,
    Path(user_id): Path<String>,
) -> Response {
    match state.store.get_application(&user_id).await {
        Some(application) => Json(application).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "no pending application"})),
        )
            .into_response(),
    }
}

#[derive(Serialize)]
struct MemberEntry {
    user_id: String,
    updated_at: String,
    note: Option<String>,
}

async fn list_members(State(state): State<Arc<DashboardState>>) -> Json<serde_json::Value> {
    let members: Vec<MemberEntry> = state
        .store
        .applicants_by_status(ApplicationStatus::Approved)
        .await
        .into_iter()
        .map(|(user_id, entry)| MemberEntry {
            user_id,
            updated_at: entry.updated_at,
            note: entry.note,
        })
        .collect();
    Json(json!({ "members": members }))
}

async fn list_admins(State(state): State<Arc<DashboardState>>) -> Json<serde_json::Value> {
    Json(json!({ "admins": state.store.admin_details().await }))
}

async fn get_stats(State(state): State<Arc<DashboardState>>) -> Json<serde_json::Value> {
    Json(serde_json::to_value(state.store.application_statistics().await).unwrap_or_default())
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct LeaderboardRow {
    user_id: String,
    xp: i64,
}

async fn get_leaderboard(
    State(state): State<Arc<DashboardState>>,
    Path(chat_id): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<serde_json::Value> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let rows: Vec<LeaderboardRow> = state
        .store
        .xp_leaderboard(&chat_id, limit)
        .await
        .into_iter()
        .map(|(user_id, xp)| LeaderboardRow { user_id, xp })
        .collect();
    Json(json!({ "chat_id": chat_id, "leaderboard": rows }))
}
