#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tower::ServiceExt;

use bookings_api::auth::password::hash_password;
use bookings_api::config::ServerConfig;
use bookings_api::router::build_app_router;
use bookings_api::state::AppState;
use bookings_db::models::user::CreateUser;
use bookings_db::repositories::UserRepo;
use bookings_mail::{MailMessage, MailQueue};

pub const ADMIN_EMAIL: &str = "admin@admin.com";
pub const ADMIN_PASSWORD: &str = "password";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        in_production: false,
        session_lifetime_hours: 24,
        mail_from: "reservations@bookings.local".to_string(),
        owner_email: "owner@bookings.local".to_string(),
        mail_queue_capacity: 16,
        admin: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Also returns the mail queue's receiving end so tests
/// can inspect what would have been sent.
pub fn build_test_app(pool: PgPool) -> (Router, mpsc::Receiver<MailMessage>) {
    let config = test_config();
    let (mail, mail_rx) = MailQueue::new(config.mail_queue_capacity);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mail,
    };
    (build_app_router(state, &config), mail_rx)
}

/// Browser stand-in: remembers the session cookie between requests.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        let request = Request::builder().uri(uri);
        self.send(request.body(Body::empty()).unwrap()).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&mut self, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(COOKIE, cookie.parse().unwrap());
        }
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            let set_cookie = set_cookie.to_str().unwrap();
            if set_cookie.contains("Max-Age=0") {
                self.cookie = None;
            } else {
                let pair = set_cookie.split(';').next().unwrap().to_string();
                self.cookie = Some(pair);
            }
        }
        response
    }

    /// Log in as the administrator created by [`create_admin`].
    pub async fn log_in(&mut self) {
        let body = format!("email={}&password={}", ADMIN_EMAIL, ADMIN_PASSWORD);
        let response = self.post_form("/user/login", &body).await;
        assert_redirect(&response, StatusCode::SEE_OTHER, "/");
    }
}

/// Insert the administrator account used by admin tests.
pub async fn create_admin(pool: &PgPool) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            access_level: 3,
        },
    )
    .await
    .unwrap();
    user.id
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_redirect(response: &Response, status: StatusCode, location: &str) {
    assert_eq!(response.status(), status);
    assert_eq!(
        response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some(location)
    );
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
