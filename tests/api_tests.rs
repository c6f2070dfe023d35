use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use catalog::config::Config;
use catalog::db::DEFAULT_API_KEY;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = catalog::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    catalog::api::router(state).await
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    api_key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-Api-Key", key);
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_auth_endpoints() {
    let app = spawn_app().await;

    let (status, _) = send(&app, "GET", "/api/system/status", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/system/status", Some("wrong-key"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/api/system/status", Some(DEFAULT_API_KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], true);
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("Authorization", format!("Bearer {DEFAULT_API_KEY}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body_json["data"]["username"], "admin");
    assert!(body_json["data"].get("api_key").is_none());
}

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");
}

#[tokio::test]
async fn test_login() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["api_key"], DEFAULT_API_KEY);
}

#[tokio::test]
async fn test_account_administration() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/accounts",
        Some(DEFAULT_API_KEY),
        Some(json!({ "username": "reader", "password": "reader-secret", "roles": ["ROLE_USER"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reader_uuid = body["data"]["uuid"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["roles"], json!(["ROLE_USER"]));

    let (status, _) = send(
        &app,
        "POST",
        "/api/accounts",
        Some(DEFAULT_API_KEY),
        Some(json!({ "username": "reader", "password": "another-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "reader", "password": "reader-secret" })),
    )
    .await;
    let reader_key = body["data"]["api_key"].as_str().unwrap().to_string();
    assert_eq!(reader_key.len(), 64);

    let (status, _) = send(&app, "GET", "/api/accounts", Some(&reader_key), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", "/api/accounts", Some(DEFAULT_API_KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/accounts/{reader_uuid}/roles"),
        Some(DEFAULT_API_KEY),
        Some(json!({ "roles": ["ROLE_ADMIN", "ROLE_USER"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["roles"], json!(["ROLE_ADMIN", "ROLE_USER"]));

    let (status, _) = send(&app, "GET", "/api/accounts", Some(&reader_key), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cannot_delete_own_account() {
    let app = spawn_app().await;

    let (_, me) = send(&app, "GET", "/api/auth/me", Some(DEFAULT_API_KEY), None).await;
    let uuid = me["data"]["uuid"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/accounts/{uuid}"),
        Some(DEFAULT_API_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "DELETE",
        "/api/accounts/00000000-0000-0000-0000-000000000000",
        Some(DEFAULT_API_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_change_password_and_regenerate_key() {
    let app = spawn_app().await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/auth/password",
        Some(DEFAULT_API_KEY),
        Some(json!({ "current_password": "password", "new_password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/auth/password",
        Some(DEFAULT_API_KEY),
        Some(json!({ "current_password": "password", "new_password": "much-longer-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/api-key/regenerate",
        Some(DEFAULT_API_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let new_key = body["data"]["api_key"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "GET", "/api/auth/me", Some(DEFAULT_API_KEY), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&new_key), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_registers() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/registers", Some(DEFAULT_API_KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["languages", "subtitles", "formats"]));

    let (status, body) = send(
        &app,
        "GET",
        "/api/registers/languages/EN",
        Some(DEFAULT_API_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["code"], "EN");

    let (status, _) = send(&app, "GET", "/api/registers/colors", Some(DEFAULT_API_KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "GET",
        "/api/registers/formats/FLOPPY",
        Some(DEFAULT_API_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
