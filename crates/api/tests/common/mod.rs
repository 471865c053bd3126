#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use stay_api::auth::jwt::{generate_token, JwtConfig};
use stay_api::auth::password::hash_password;
use stay_api::config::ServerConfig;
use stay_api::router::build_app_router;
use stay_api::state::AppState;
use stay_api::upload::UploadStore;
use stay_db::models::user::{CreateUser, User};
use stay_db::repositories::UserRepo;

/// Password used for every seeded user. Satisfies the password policy.
pub const TEST_PASSWORD: &str = "Secret1!";

const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";
const MULTIPART_BOUNDARY: &str = "stay-test-boundary";

static PHONE_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        max_body_bytes: 20 * 1024 * 1024,
        jwt: test_jwt(),
    }
}

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        token_expiry_hours: 10,
    }
}

/// The application under test plus the temporary upload root it writes to.
///
/// The directory is removed when the value is dropped.
pub struct TestApp {
    router: Router,
    pub upload_dir: TempDir,
}

impl TestApp {
    /// A fresh handle on the router; `oneshot` consumes it.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Whether a stored upload (path relative to the upload root) exists.
    pub fn upload_exists(&self, relative: &str) -> bool {
        self.upload_dir.path().join(relative).exists()
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a temporary upload directory.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("temp upload dir");
    let config = test_config(upload_dir.path());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        uploads: UploadStore::new(upload_dir.path()),
    };

    TestApp {
        router: build_app_router(state, &config),
        upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// A phone number unique within the test process.
pub fn unique_phone() -> String {
    let n = PHONE_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("+7 999 {n:07}")
}

/// Insert a user directly and return the row.
pub async fn seed_user(pool: &PgPool, username: &str, role_id: i64) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        phone: unique_phone(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role_id,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Mint a valid access token for `user`.
pub fn token_for(user: &User) -> String {
    generate_token(user.id, &user.username, user.role_id, &test_jwt())
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).expect("request builds"))
        .await
        .expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// A file part for [`multipart`].
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

/// Send a `multipart/form-data` request with text fields and an optional file.
pub async fn multipart(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
) -> Response {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder().method(method).uri(uri).header(
        CONTENT_TYPE,
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body)).expect("request builds"))
        .await
        .expect("router is infallible")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}
