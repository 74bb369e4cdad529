mod support;

use axum::http::{header, StatusCode};
use support::{bare_request, register_request, spawn_app, token_request};

#[tokio::test]
async fn register_then_token() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let (status, _, body) = app.send(register_request("alice", "wonderland")?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.is_null());

    let (status, _, body) = app.send(token_request("alice", "wonderland")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| t.split('.').count() == 3));
    assert!(body.get("expires_at").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_username_conflicts() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, _, _) = app.send(register_request("bob", "pw")?).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _, body) = app.send(register_request("bob", "other")?).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].is_string());
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    app.send(register_request("carol", "right")?).await?;

    for (user, pass) in [("carol", "wrong"), ("nobody", "right")] {
        let (status, headers, body) = app.send(token_request(user, pass)?).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Incorrect username or password");
        assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_public() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, _, body) = app.send(bare_request("GET", "/health", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _, body) = app.send(bare_request("GET", "/api-docs/openapi.json", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/products/{product_id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn incomplete_login_form_answers_with_detail() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(axum::body::Body::from("username=alice"))?;
    let (status, _, body) = app.send(req).await?;
    assert!(status.is_client_error());
    assert!(body["detail"].as_str().is_some_and(|d| d.contains("password")), "{body}");

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/auth/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))?;
    let (status, _, body) = app.send(req).await?;
    assert!(status.is_client_error());
    assert!(body["detail"].is_string(), "{body}");
    Ok(())
}
