#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use presurvey_core::error::CoreError;
use presurvey_core::submission::RowAppender;
use presurvey_core::types::CellValue;
use tower::ServiceExt;

use presurvey_api::config::ServerConfig;
use presurvey_api::page::Templates;
use presurvey_api::router::build_app_router;
use presurvey_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        credentials_path: "google-credentials.json".into(),
        secrets_path: ".streamlit/secrets.toml".into(),
        spreadsheet_name: "Test Responses".to_string(),
    }
}

/// In-memory worksheet that keeps every appended row.
#[derive(Default)]
pub struct RecordingSheet {
    rows: Mutex<Vec<Vec<CellValue>>>,
}

impl RecordingSheet {
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RowAppender for RecordingSheet {
    async fn append_row(&self, row: &[CellValue]) -> Result<(), CoreError> {
        self.rows.lock().unwrap().push(row.to_vec());
        Ok(())
    }
}

/// Worksheet whose every append fails with the given message.
pub struct FailingSheet(pub &'static str);

#[async_trait]
impl RowAppender for FailingSheet {
    async fn append_row(&self, _row: &[CellValue]) -> Result<(), CoreError> {
        Err(CoreError::Append(self.0.to_string()))
    }
}

/// Build the full application router around `appender`, with the same
/// middleware stack production uses.
pub fn build_test_app(appender: Arc<dyn RowAppender>) -> Router {
    let state = AppState {
        appender,
        templates: Arc::new(Templates::new().unwrap()),
    };
    build_app_router(state, &test_config())
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an url-encoded form. Repeated keys are sent as repeated pairs.
pub async fn post_form(app: Router, uri: &str, pairs: &[(&str, &str)]) -> Response {
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Percent-encode a form value (`application/x-www-form-urlencoded`).
fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
