//! Common test utilities and fixtures
#![allow(dead_code)]

use audioshare_server::{api, services::{AuthService, FileStorage}, state::AppState};
use audioshare_storage::LocalStorageContext;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-key-32-bytes!";
pub const MULTIPART_BOUNDARY: &str = "audioshare-test-boundary";

/// Leading bytes of a valid ADTS stream
pub const AAC_BYTES: [u8; 8] = [0xFF, 0xF1, 0x50, 0x80, 0x02, 0x1F, 0xFC, 0x21];

/// Router over a temp-file database and blob directory
pub struct TestApp {
    pub app: Router,
    pub storage: LocalStorageContext,
    pub auth_service: Arc<AuthService>,
    pub file_storage: Arc<FileStorage>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = audioshare_storage::connect(&format!("sqlite://{}", db_path.display()))
            .await
            .unwrap();
        // Minimum bcrypt cost keeps sign-up fast
        let storage = LocalStorageContext::new(pool).with_bcrypt_cost(4);

        let file_storage = FileStorage::new(temp_dir.path().join("audio"));
        file_storage.initialize().await.unwrap();
        let file_storage = Arc::new(file_storage);

        let auth_service = Arc::new(
            AuthService::new(
                TEST_SECRET,
                Arc::new(storage.clone()),
                Duration::minutes(15),
                Duration::days(30),
            )
            .unwrap(),
        );

        let state = AppState::with_storage(
            storage.clone(),
            Arc::clone(&auth_service),
            Arc::clone(&file_storage),
        );

        Self {
            app: api::router(state),
            storage,
            auth_service,
            file_storage,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and return status plus parsed JSON body (Null when empty)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    /// Send a request and return the raw response
    pub async fn send_raw(&self, request: Request<Body>) -> axum::response::Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Sign up then sign in, returning the user id and access token
    pub async fn register(&self, name: &str, username: &str) -> (i64, String) {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/auth/sign-up",
                None,
                serde_json::json!({
                    "name": name,
                    "username": username,
                    "password": password_for(username),
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "sign-up failed: {body}");
        let id = body["id"].as_i64().unwrap();

        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/auth/sign-in",
                None,
                serde_json::json!({
                    "username": username,
                    "password": password_for(username),
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "sign-in failed: {body}");

        (id, body["token"].as_str().unwrap().to_string())
    }

    /// Upload `data` as the `file` field, returning the new audio id
    pub async fn upload(&self, token: &str, data: &[u8]) -> i64 {
        let (status, body) = self.send(upload_request(token, data)).await;
        assert_eq!(status, StatusCode::OK, "upload failed: {body}");
        body["id"].as_i64().unwrap()
    }
}

pub fn password_for(username: &str) -> String {
    format!("{username}-password")
}

pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn multipart_body(field: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"upload.aac\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(token: &str, data: &[u8]) -> Request<Body> {
    upload_request_with_field(token, "file", data)
}

pub fn upload_request_with_field(token: &str, field: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/audio/")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, data)))
        .unwrap()
}
