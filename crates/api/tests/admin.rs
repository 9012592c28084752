//! HTTP-level integration tests for login and the administrator pages.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{assert_redirect, body_string, count, TestClient};
use sqlx::PgPool;
use bookings_core::dates::DateRange;
use bookings_core::forms::GuestDetails;
use bookings_db::booking::{self, BookingOutcome};
use bookings_db::models::reservation::{CreateReservation, Reservation};
use bookings_db::repositories::{ReservationRepo, RoomRestrictionRepo};

async fn seed_reservation(pool: &PgPool, start: &str, end: &str) -> Reservation {
    let input = CreateReservation {
        guest: GuestDetails {
            first_name: "Sam".into(),
            last_name: "Smith".into(),
            email: "sam@smith.com".into(),
            phone: String::new(),
        },
        dates: DateRange::parse(start, end).unwrap(),
        room_id: 1,
    };
    let outcome = booking::book_room(pool, &input).await.unwrap();
    assert_matches!(outcome, BookingOutcome::Booked(reservation) => reservation)
}

async fn admin_client(pool: &PgPool) -> TestClient {
    common::create_admin(pool).await;
    let (app, _mail) = common::build_test_app(pool.clone());
    let mut client = TestClient::new(app);
    client.log_in().await;
    client
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_admin_request_redirects_to_login(pool: PgPool) {
    let (app, _mail) = common::build_test_app(pool);
    let mut client = TestClient::new(app);

    for uri in [
        "/admin/dashboard",
        "/admin/reservations-new",
        "/admin/reservations-calendar",
    ] {
        let response = client.get(uri).await;
        assert_redirect(&response, StatusCode::SEE_OTHER, "/user/login");
    }

    let html = body_string(client.get("/user/login").await).await;
    assert!(html.contains("Log in first!"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_post_changes_nothing(pool: PgPool) {
    let reservation = seed_reservation(&pool, "2050-01-01", "2050-01-03").await;
    let (app, _mail) = common::build_test_app(pool.clone());
    let mut client = TestClient::new(app);

    let uri = format!("/admin/delete-reservation/all/{}", reservation.id);
    let response = client.post_form(&uri, "").await;
    assert_redirect(&response, StatusCode::SEE_OTHER, "/user/login");
    assert_eq!(count(&pool, "reservations").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_email_look_the_same(pool: PgPool) {
    common::create_admin(&pool).await;
    let (app, _mail) = common::build_test_app(pool);

    let mut notices = Vec::new();
    for body in [
        "email=admin%40admin.com&password=wrong",
        "email=nobody%40admin.com&password=password",
    ] {
        let mut client = TestClient::new(app.clone());
        let response = client.post_form("/user/login", body).await;
        assert_redirect(&response, StatusCode::SEE_OTHER, "/user/login");
        let html = body_string(client.get("/user/login").await).await;
        assert!(html.contains("Invalid login credentials"));
        notices.push(html);
    }
    assert_eq!(notices[0], notices[1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_login_form_rerenders(pool: PgPool) {
    let (app, _mail) = common::build_test_app(pool);
    let mut client = TestClient::new(app);

    let response = client.post_form("/user/login", "email=not-an-email&password=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Invalid email address"));
    assert!(html.contains("This field cannot be blank"));
    assert!(html.contains("value=\"not-an-email\""));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_then_logout(pool: PgPool) {
    let mut client = admin_client(&pool).await;

    let html = body_string(client.get("/").await).await;
    assert!(html.contains("Logged in successfully"));
    assert!(html.contains("/user/logout"));

    let response = client.get("/admin/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.get("/user/logout").await;
    assert_redirect(&response, StatusCode::SEE_OTHER, "/user/login");

    let response = client.get("/admin/dashboard").await;
    assert_redirect(&response, StatusCode::SEE_OTHER, "/user/login");
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn lists_show_new_and_all_reservations(pool: PgPool) {
    let first = seed_reservation(&pool, "2050-01-01", "2050-01-03").await;
    let second = seed_reservation(&pool, "2050-02-01", "2050-02-03").await;
    ReservationRepo::set_processed(
        &pool,
        second.id,
        bookings_db::models::status::ProcessedStatus::Processed,
    )
    .await
    .unwrap();
    let mut client = admin_client(&pool).await;

    let html = body_string(client.get("/admin/reservations-new").await).await;
    assert!(html.contains(&format!("/admin/reservations/new/{}", first.id)));
    assert!(!html.contains(&format!("/admin/reservations/new/{}", second.id)));

    let html = body_string(client.get("/admin/reservations-all").await).await;
    assert!(html.contains(&format!("/admin/reservations/all/{}", first.id)));
    assert!(html.contains(&format!("/admin/reservations/all/{}", second.id)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn show_unknown_reservation_is_not_found(pool: PgPool) {
    let mut client = admin_client(&pool).await;

    let response = client.get("/admin/reservations/all/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.get("/admin/reservations/bogus/1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_saves_guest_fields(pool: PgPool) {
    let reservation = seed_reservation(&pool, "2050-01-01", "2050-01-03").await;
    let mut client = admin_client(&pool).await;
    let uri = format!("/admin/reservations/all/{}", reservation.id);

    let response = client.get(&uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("value=\"Sam\""));

    let response = client
        .post_form(
            &uri,
            "first_name=Samuel&last_name=Smith&email=samuel%40smith.com&phone=555",
        )
        .await;
    assert_redirect(&response, StatusCode::SEE_OTHER, "/admin/reservations-all");

    let stored = ReservationRepo::find_by_id(&pool, reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.first_name, "Samuel");
    assert_eq!(stored.email, "samuel@smith.com");
    assert_eq!(stored.start_date, reservation.start_date);

    let html = body_string(client.get("/admin/reservations-all").await).await;
    assert!(html.contains("Changes saved"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_update_rerenders_without_saving(pool: PgPool) {
    let reservation = seed_reservation(&pool, "2050-01-01", "2050-01-03").await;
    let mut client = admin_client(&pool).await;
    let uri = format!("/admin/reservations/new/{}", reservation.id);

    let response = client
        .post_form(&uri, "first_name=Jo&last_name=Smith&email=sam%40smith.com&phone=")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("at least 3 characters"));

    let stored = ReservationRepo::find_by_id(&pool, reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.first_name, "Sam");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn process_marks_reservation_and_returns_to_calendar(pool: PgPool) {
    let reservation = seed_reservation(&pool, "2050-01-01", "2050-01-03").await;
    let mut client = admin_client(&pool).await;

    let uri = format!("/admin/process-reservation/cal/{}", reservation.id);
    let response = client.post_form(&uri, "y=2050&m=1").await;
    assert_redirect(
        &response,
        StatusCode::SEE_OTHER,
        "/admin/reservations-calendar?y=2050&m=1",
    );

    let stored = ReservationRepo::find_by_id(&pool, reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_processed());
    assert!(ReservationRepo::list_new(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_reservation_and_its_restriction(pool: PgPool) {
    let reservation = seed_reservation(&pool, "2050-01-01", "2050-01-03").await;
    let mut client = admin_client(&pool).await;

    let uri = format!("/admin/delete-reservation/new/{}", reservation.id);
    let response = client.post_form(&uri, "").await;
    assert_redirect(&response, StatusCode::SEE_OTHER, "/admin/reservations-new");

    assert_eq!(count(&pool, "reservations").await, 0);
    assert_eq!(count(&pool, "room_restrictions").await, 0);

    let response = client.post_form(&uri, "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn calendar_shows_reservations_and_blocks(pool: PgPool) {
    let reservation = seed_reservation(&pool, "2050-01-10", "2050-01-12").await;
    RoomRestrictionRepo::create_block(&pool, 2, "2050-01-20".parse().unwrap())
        .await
        .unwrap();
    let mut client = admin_client(&pool).await;

    let response = client.get("/admin/reservations-calendar?y=2050&m=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("January 2050"));
    assert!(html.contains(&format!(
        "/admin/reservations/cal/{}?y=2050&amp;m=1",
        reservation.id
    )));
    assert!(html.contains("name=\"remove_block_2_2050-01-20\" checked"));
    assert!(html.contains("name=\"add_block_1_2050-01-12\""));
    assert!(!html.contains("add_block_1_2050-01-11"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn calendar_post_adds_and_removes_blocks(pool: PgPool) {
    seed_reservation(&pool, "2050-01-10", "2050-01-12").await;
    for day in ["2050-01-20", "2050-01-21"] {
        RoomRestrictionRepo::create_block(&pool, 2, day.parse().unwrap())
            .await
            .unwrap();
    }
    let mut client = admin_client(&pool).await;
    let response = client.get("/admin/reservations-calendar?y=2050&m=1").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Keep the 21st, drop the 20th, add the 5th for room 1 and a bogus room.
    let response = client
        .post_form(
            "/admin/reservations-calendar",
            "y=2050&m=1&remove_block_2_2050-01-21=on\
             &add_block_1_2050-01-05=on&add_block_99_2050-01-05=on",
        )
        .await;
    assert_redirect(
        &response,
        StatusCode::SEE_OTHER,
        "/admin/reservations-calendar?y=2050&m=1",
    );

    let window = DateRange::parse("2050-01-01", "2050-02-01").unwrap();
    let room_two = RoomRestrictionRepo::list_for_room_in_range(&pool, 2, window)
        .await
        .unwrap();
    assert_eq!(room_two.len(), 1);
    assert_eq!(room_two[0].start_date, "2050-01-21".parse().unwrap());

    let room_one = RoomRestrictionRepo::list_for_room_in_range(&pool, 1, window)
        .await
        .unwrap();
    assert_eq!(room_one.len(), 2);
    assert!(room_one
        .iter()
        .any(|r| r.reservation_id.is_none() && r.start_date == "2050-01-05".parse().unwrap()));
    assert!(room_one.iter().any(|r| r.reservation_id.is_some()));

    let html = body_string(client.get("/admin/reservations-calendar?y=2050&m=1").await).await;
    assert!(html.contains("Changes saved"));
    assert!(html.contains("name=\"remove_block_1_2050-01-05\" checked"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn calendar_post_warns_about_blocks_removed_elsewhere(pool: PgPool) {
    let block = RoomRestrictionRepo::create_block(&pool, 2, "2050-01-20".parse().unwrap())
        .await
        .unwrap();
    let mut client = admin_client(&pool).await;
    let response = client.get("/admin/reservations-calendar?y=2050&m=1").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Another session clears the block before this one saves.
    assert!(RoomRestrictionRepo::delete_block(&pool, block.id).await.unwrap());

    let response = client
        .post_form("/admin/reservations-calendar", "y=2050&m=1")
        .await;
    assert_redirect(
        &response,
        StatusCode::SEE_OTHER,
        "/admin/reservations-calendar?y=2050&m=1",
    );

    let html = body_string(client.get("/admin/reservations-calendar?y=2050&m=1").await).await;
    assert!(html.contains("Changes saved"));
    assert!(html.contains("Some blocks had already been removed"));
}
