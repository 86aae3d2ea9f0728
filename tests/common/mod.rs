//! Shared helpers for the integration tests.
//!
//! Not every test file uses every helper, hence the `allow(dead_code)`
//! sprinkled around: each integration test is its own crate and only sees
//! the parts it imports.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::header;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use trackyrs::api::AppState;
use trackyrs::api::build_router;
use trackyrs::config::Config;
use trackyrs::model::AnimeModel;
use trackyrs::model::MangaModel;
use trackyrs::repository::Repository;
use trackyrs::service::Services;

/// Loads a canned Jikan response from `tests/responses/`.
#[allow(dead_code)]
pub fn get_response(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/responses");
    path.push(filename);
    std::fs::read_to_string(path).expect("Failed to read response file")
}

/// Config for tests: fixed JWT secret, fast Jikan retries.
#[allow(dead_code)]
pub fn test_config(jikan_base_url: &str) -> Config {
    Config {
        jikan_base_url: jikan_base_url.trim_end_matches('/').to_string(),
        jikan_max_retries: 2,
        jikan_retry_delay: Duration::from_millis(50),
        jwt_secret: Some("integration-test-secret".to_string()),
        jwt_expiry_hours: 1,
        ..Config::default()
    }
}

/// Builds the production router on top of the given pool.
#[allow(dead_code)]
pub fn build_test_app(pool: PgPool) -> Router {
    let config = Arc::new(test_config("http://127.0.0.1:1"));
    let db = Arc::new(Repository::from_pool(pool));
    let services = Arc::new(Services::new(db, &config).expect("Failed to build services"));
    build_router(AppState { services, config })
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("Failed to send request")
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collects the response body and parses it as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body was not valid JSON")
}

/// Registers a fresh user through the API and returns its bearer token.
#[allow(dead_code)]
pub async fn register_user(app: &Router, username: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/register",
        serde_json::json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "correct horse battery staple",
        }),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["token"]
        .as_str()
        .expect("Register returned no token")
        .to_string()
}

/// Minimal anime row for seeding catalog tests.
#[allow(dead_code)]
pub fn sample_anime(mal_id: i64, title: &str) -> AnimeModel {
    AnimeModel {
        mal_id,
        title: title.to_string(),
        url: format!("https://myanimelist.net/anime/{mal_id}"),
        ..Default::default()
    }
}

/// Minimal manga row for seeding catalog tests.
#[allow(dead_code)]
pub fn sample_manga(mal_id: i64, title: &str) -> MangaModel {
    MangaModel {
        mal_id,
        title: title.to_string(),
        url: format!("https://myanimelist.net/manga/{mal_id}"),
        ..Default::default()
    }
}
