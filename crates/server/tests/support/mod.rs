#![allow(dead_code)]
use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "catalog-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub cfg: AppConfig,
    _db_dir: TempDir,
    _media_dir: TempDir,
}

/// Router over a migrated SQLite file and a temp upload dir.
pub async fn spawn_app() -> anyhow::Result<TestApp> {
    let db_dir = tempfile::tempdir()?;
    let media_dir = tempfile::tempdir()?;

    let mut cfg = AppConfig::default();
    cfg.database.url = format!("sqlite://{}?mode=rwc", db_dir.path().join("api.db").display());
    cfg.database.max_connections = 4;
    cfg.auth.secret_key = "test-secret".into();
    cfg.media.upload_dir = media_dir.path().join("uploads").to_string_lossy().into_owned();
    cfg.normalize_and_validate()?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    let state = server::startup::build_state(db, &cfg)?;
    let router = server::routes::build_router(state, server::startup::build_cors(), &cfg.media);
    Ok(TestApp { router, cfg, _db_dir: db_dir, _media_dir: media_dir })
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, HeaderMap, Value)> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        Ok((status, headers, body))
    }

    pub async fn raw(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        Ok((status, bytes.to_vec()))
    }

    /// Register `username` and return a bearer token for it.
    pub async fn login(&self, username: &str, password: &str) -> anyhow::Result<String> {
        let (status, _, _) = self.send(register_request(username, password)?).await?;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _, body) = self.send(token_request(username, password)?).await?;
        assert_eq!(status, StatusCode::OK);
        Ok(body["access_token"].as_str().unwrap_or_default().to_string())
    }
}

pub fn register_request(username: &str, password: &str) -> anyhow::Result<Request<Body>> {
    let body = serde_json::to_vec(&serde_json::json!({"username": username, "password": password}))?;
    Ok(Request::builder()
        .method("POST")
        .uri("/auth/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))?)
}

pub fn token_request(username: &str, password: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))?)
}

/// A form part: text field or file.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes());
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, content) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"));
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    Ok(builder.body(Body::from(multipart_body(parts)))?)
}

pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    Ok(builder.body(Body::empty())?)
}
