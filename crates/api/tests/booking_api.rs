//! HTTP-level tests for submitting, editing, reading and cancelling bookings.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, booking_body, get, get_auth, post_auth, post_json_auth, post_raw_json_auth,
    put_json_auth,
};
use roombook_core::booking::BookingStatus;
use roombook_db::models::room::UpdateRoom;
use roombook_db::repositories::{BookingRepo, RoomRepo};
use sqlx::PgPool;

async fn submit(
    app: &axum::Router,
    token: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = post_json_auth(app.clone(), "/api/v1/bookings", body, token).await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Conflict detection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlapping_request_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "ComLab 1").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;
    let (_, bob) = common::user_with_token(&app, &pool, "bob", "student").await;

    let (status, json) = submit(&app, &alice, booking_body(room.id, "10:00", "11:00")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["room_name"], "ComLab 1");

    let (status, json) = submit(&app, &bob, booking_body(room.id, "10:30", "11:30")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "ComLab 1 is already booked for this time slot");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn back_to_back_request_is_accepted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "ComLab 1").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;
    let (_, bob) = common::user_with_token(&app, &pool, "bob", "student").await;

    let (status, _) = submit(&app, &alice, booking_body(room.id, "10:00", "11:00")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = submit(&app, &bob, booking_body(room.id, "11:00", "12:00")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = submit(&app, &bob, booking_body(room.id, "09:00", "10:00")).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_time_in_another_room_is_accepted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let lab1 = common::create_room(&pool, "ComLab 1").await;
    let lab2 = common::create_room(&pool, "ComLab 2").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;

    let (status, _) = submit(&app, &alice, booking_body(lab1.id, "10:00", "11:00")).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = submit(&app, &alice, booking_body(lab2.id, "10:00", "11:00")).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn end_not_after_start_is_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "ComLab 1").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;

    let (status, json) = submit(&app, &alice, booking_body(room.id, "11:00", "10:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "End time must be after start time");

    let (status, _) = submit(&app, &alice, booking_body(room.id, "10:00", "10:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelled_booking_frees_its_slot(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "ComLab 1").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;
    let (_, bob) = common::user_with_token(&app, &pool, "bob", "student").await;

    let (_, json) = submit(&app, &alice, booking_body(room.id, "10:00", "11:00")).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let response = post_auth(app.clone(), &format!("/api/v1/bookings/{id}/cancel"), &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "cancelled");

    let (status, _) = submit(&app, &bob, booking_body(room.id, "10:00", "11:00")).await;
    assert_eq!(status, StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Catalogue checks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_room_cannot_be_booked(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "Old Lab").await;
    RoomRepo::update(
        &pool,
        room.id,
        &UpdateRoom {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;

    let (status, json) = submit(&app, &alice, booking_body(room.id, "10:00", "11:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Old Lab is not available for booking");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_room_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;

    let (status, _) = submit(&app, &alice, booking_body(9999, "10:00", "11:00")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn equipment_is_linked_and_validated(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "AVR").await;
    let projector = common::create_equipment(&pool, "Projector").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;

    let mut body = booking_body(room.id, "10:00", "11:00");
    body["equipment_ids"] = serde_json::json!([projector.id, projector.id]);
    let (status, json) = submit(&app, &alice, body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["equipment_ids"], serde_json::json!([projector.id]));

    let mut body = booking_body(room.id, "13:00", "14:00");
    body["equipment_ids"] = serde_json::json!([projector.id, 424242]);
    let (status, json) = submit(&app, &alice, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Unknown equipment selected");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_purpose_is_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "ComLab 1").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;

    let mut body = booking_body(room.id, "10:00", "11:00");
    body["purpose"] = serde_json::json!("  ");
    let (status, _) = submit(&app, &alice, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Ownership and lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_owner_may_cancel(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "ComLab 1").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;
    let (_, bob) = common::user_with_token(&app, &pool, "bob", "student").await;

    let (_, json) = submit(&app, &alice, booking_body(room.id, "10:00", "11:00")).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let response = post_auth(app.clone(), &format!("/api/v1/bookings/{id}/cancel"), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let booking = BookingRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(booking.status(), Some(BookingStatus::Pending));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelling_approved_booking_is_409_and_leaves_it_unchanged(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "ComLab 1").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;

    let (_, json) = submit(&app, &alice, booking_body(room.id, "10:00", "11:00")).await;
    let id = json["data"]["id"].as_i64().unwrap();
    BookingRepo::transition(&pool, id, BookingStatus::Pending, BookingStatus::Approved)
        .await
        .unwrap()
        .unwrap();

    let response = post_auth(app.clone(), &format!("/api/v1/bookings/{id}/cancel"), &alice).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let booking = BookingRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(booking.status(), Some(BookingStatus::Approved));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn edit_ignores_own_slot_but_not_others(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "ComLab 1").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;
    let (_, bob) = common::user_with_token(&app, &pool, "bob", "student").await;

    let (_, json) = submit(&app, &alice, booking_body(room.id, "10:00", "11:00")).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let (status, _) = submit(&app, &bob, booking_body(room.id, "12:00", "13:00")).await;
    assert_eq!(status, StatusCode::CREATED);

    // Shifting within its own footprint is fine.
    let uri = format!("/api/v1/bookings/{id}");
    let response =
        put_json_auth(app.clone(), &uri, booking_body(room.id, "10:30", "11:30"), &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["start_time"], "2030-06-03T10:30:00Z");

    // Moving onto Bob's slot is not.
    let response =
        put_json_auth(app.clone(), &uri, booking_body(room.id, "11:30", "12:30"), &alice).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Nor may Bob edit Alice's booking.
    let response = put_json_auth(app, &uri, booking_body(room.id, "15:00", "16:00"), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_visible_to_owner_and_staff_only(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let room = common::create_room(&pool, "ComLab 1").await;
    let (_, alice) = common::user_with_token(&app, &pool, "alice", "student").await;
    let (_, bob) = common::user_with_token(&app, &pool, "bob", "student").await;
    let (_, staff) = common::user_with_token(&app, &pool, "registrar", "admin").await;

    let (_, json) = submit(&app, &alice, booking_body(room.id, "10:00", "11:00")).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/bookings/{id}");

    assert_eq!(get_auth(app.clone(), &uri, &alice).await.status(), StatusCode::OK);
    assert_eq!(get_auth(app.clone(), &uri, &staff).await.status(), StatusCode::OK);
    assert_eq!(get_auth(app.clone(), &uri, &bob).await.status(), StatusCode::FORBIDDEN);

    let mine = body_json(get_auth(app.clone(), "/api/v1/bookings", &bob).await).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 0);
    let mine = body_json(get_auth(app, "/api/v1/bookings", &alice).await).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bookings_require_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/bookings").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Malformed requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_body_gets_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = common::user_with_token(&app, &pool, "typo", "student").await;

    let response =
        post_raw_json_auth(app.clone(), "/api/v1/bookings", "{\"room_id\": ", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());

    // Well-formed JSON with a missing field is rejected the same way.
    let body = serde_json::json!({ "room_id": 1 });
    let response = post_json_auth(app, "/api/v1/bookings", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_id_gets_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = common::user_with_token(&app, &pool, "curious", "student").await;

    let response = get_auth(app.clone(), "/api/v1/bookings/abc", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");

    let response = get_auth(app, "/api/v1/notifications?limit=lots", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
