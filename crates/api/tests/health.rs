//! Integration tests for the health report and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, TestClient};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_rooms_and_mail_backlog(pool: PgPool) {
    let (app, _mail) = common::build_test_app(pool);
    let response = TestClient::new(app).get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert_eq!(json["rooms"], 2);
    assert_eq!(json["mail_backlog"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn closed_pool_reports_degraded(pool: PgPool) {
    let (app, _mail) = common::build_test_app(pool.clone());
    pool.close().await;
    let json = body_json(TestClient::new(app).get("/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], false);
    assert!(json["rooms"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let (app, _mail) = common::build_test_app(pool);
    let response = TestClient::new(app).get("/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let (app, _mail) = common::build_test_app(pool);
    let response = TestClient::new(app).get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response.headers().get("x-request-id");
    assert_eq!(request_id.unwrap().to_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn static_pages_render(pool: PgPool) {
    let (app, _mail) = common::build_test_app(pool);
    let mut client = TestClient::new(app);

    for path in ["/", "/about", "/generals-quarters", "/majors-suite", "/contact", "/search-availability"] {
        let response = client.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }
}
