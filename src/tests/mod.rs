use crate::config::{AppConfig, base_url};
use crate::database::sqlite::SqliteRepository;
use crate::{AppState, app_router};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

mod unit_markdown_parser;
mod unit_redirect_sanitizer;
mod unit_sqlite_repository;

// a fresh in-memory database with every migration applied
pub async fn setup_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
        bind_addr: "127.0.0.1:0".into(),
        app_protocol: "https://".into(),
        app_domain: "vibecoding.community".into(),
        base_url: base_url("https://", "vibecoding.community").expect("valid base url"),
        community_name: "Vibecoding Community".into(),
        twitter_handle: "vibecoding".into(),
        content_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("content"),
        assets_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/images"),
        seed_on_boot: false,
        checkin_username: "codenewbiestaff".into(),
        api_docs_url: "https://developers.forem.com/api".into(),
        landing_cache_max_age: 600,
    }
}

// the real router wired onto an in-memory store
pub async fn setup_app() -> (Router, Arc<SqliteRepository>, SqlitePool) {
    let pool = setup_test_pool().await;
    let store = Arc::new(SqliteRepository::new(pool.clone()));
    let state = AppState::new(store.clone(), Arc::new(test_config())).expect("templates load");
    (app_router(state), store, pool)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_on_host(app: &Router, host: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body fits in memory");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub async fn insert_subforem(pool: &SqlitePool, domain: &str) -> i64 {
    sqlx::query("INSERT INTO subforems (domain) VALUES (?)")
        .bind(domain)
        .execute(pool)
        .await
        .expect("insert subforem")
        .last_insert_rowid()
}

pub async fn insert_user(pool: &SqlitePool, username: &str) -> i64 {
    sqlx::query("INSERT INTO users (username, registered) VALUES (?, 1)")
        .bind(username)
        .execute(pool)
        .await
        .expect("insert user")
        .last_insert_rowid()
}

pub struct ArticleFixture<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub path: &'a str,
    pub tags: &'a [&'a str],
    pub published: bool,
    pub published_at: &'a str,
}

pub async fn insert_article(pool: &SqlitePool, article: ArticleFixture<'_>) -> i64 {
    let tags = serde_json::to_string(article.tags).expect("tags serialize");
    sqlx::query(
        "INSERT INTO articles (title, path, description, user_id, tags, published, published_at) \
         VALUES (?, ?, '', ?, ?, ?, ?)",
    )
    .bind(article.title)
    .bind(article.path)
    .bind(article.user_id)
    .bind(tags)
    .bind(article.published)
    .bind(article.published_at)
    .execute(pool)
    .await
    .expect("insert article")
    .last_insert_rowid()
}
