//! Stub backend served by axum on an ephemeral port.

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use serde_json::{Value, json};

use quill_backend::BackendClient;
use quill_core::config::BackendConfig;

/// Credential the stub accepts on `/auth/me`.
pub const GOOD_TOKEN: &str = "good-token";
/// Credential that makes `/auth/me` fail with a server error.
pub const BROKEN_TOKEN: &str = "broken-token";

async fn exchange(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    match email.as_str() {
        "blocked@example.com" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "exchange failed" })),
        ),
        "tokenless@example.com" => (
            StatusCode::OK,
            Json(json!({ "user": { "_id": "u2", "name": "No Token", "email": email } })),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({
                "token": GOOD_TOKEN,
                "user": {
                    "_id": "u1",
                    "name": body["name"],
                    "email": email,
                    "image": body["image"],
                    "role": "admin",
                    "googleId": body["googleId"],
                }
            })),
        ),
    }
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    match bearer {
        GOOD_TOKEN => (
            StatusCode::OK,
            Json(json!({
                "user": { "_id": "u1", "name": "Ana", "email": "ana@example.com", "role": "admin" }
            })),
        ),
        BROKEN_TOKEN => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "boom" })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid token" })),
        ),
    }
}

/// A running stub backend.
pub struct StubBackend {
    pub base_url: String,
}

impl StubBackend {
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/api/auth/google", post(exchange))
            .route("/api/auth/me", get(me));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
        }
    }

    pub fn client(&self) -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: self.base_url.clone(),
            timeout_seconds: 5,
        })
        .unwrap()
    }
}

/// A client pointed at a port nothing listens on.
pub async fn unreachable_client() -> BackendClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    BackendClient::new(&BackendConfig {
        base_url: format!("http://{addr}/api"),
        timeout_seconds: 2,
    })
    .unwrap()
}
