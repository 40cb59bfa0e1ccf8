#![allow(dead_code)]
use axum::{
    body::Body,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use leavedesk_edge::{app::build_router, config::Config, state::AppState};
use serde_json::{json, Value};
use std::{collections::HashMap, fs, net::SocketAddr};
use tempfile::TempDir;

pub const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"app\"></div></body></html>";

/// Built-frontend stand-in. Keep the `TempDir` alive for the test duration.
pub fn static_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create static dir");
    fs::write(dir.path().join("index.html"), INDEX_HTML).expect("write index.html");
    dir
}

pub fn test_config(static_dir: &TempDir, backend_url: &str, jwt_secret: Option<&str>) -> Config {
    let mut vars = HashMap::new();
    vars.insert("EDGE_BIND_ADDR", "127.0.0.1:0".to_string());
    vars.insert("BACKEND_API_URL", backend_url.to_string());
    vars.insert(
        "STATIC_DIR",
        static_dir.path().to_string_lossy().into_owned(),
    );
    vars.insert("PROXY_TIMEOUT_SECS", "5".to_string());
    if let Some(secret) = jwt_secret {
        vars.insert("EDGE_JWT_SECRET", secret.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

pub fn test_app(static_dir: &TempDir, backend_url: &str) -> Router {
    let state = AppState::new(test_config(static_dir, backend_url, None)).expect("build state");
    build_router(state)
}

/// Address nothing listens on, for upstream-down cases.
pub fn unreachable_backend() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}", addr)
}

/// Minimal leave API used behind the proxy. `/echo` reflects what it got.
pub async fn spawn_fake_backend() -> SocketAddr {
    let app = Router::new()
        .route("/auth/login", post(fake_login))
        .route("/echo/{*rest}", get(echo).post(echo))
        .route("/broken", get(broken))
        .route("/leaves/missing", get(not_found));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("fake backend addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake backend");
    });
    addr
}

async fn fake_login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        Json(json!({
            "access_token": "header.payload.signature",
            "user": { "email": body["email"], "full_name": "Dana Reyes", "roles": ["HR"] }
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid email or password" })),
        )
            .into_response()
    }
}

async fn echo(headers: HeaderMap, uri: axum::http::Uri, body: String) -> Json<Value> {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({
        "path": uri.path(),
        "query": uri.query(),
        "authorization": authorization,
        "body": body,
    }))
}

async fn broken() -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("content-type", "text/html")
        .body(Body::from("<h1>Internal Server Error</h1>"))
        .expect("build broken response")
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Leave request not found" })),
    )
        .into_response()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
