mod common;

use axum::http::StatusCode;
use chrono::{NaiveDate, NaiveTime};
use common::{parse_body, TestApp};
use conference_backend::domain::models::talk::ScheduleSlot;
use conference_backend::domain::models::user::Role;
use conference_backend::domain::ports::TalkRepository;
use conference_backend::error::AppError;
use serde_json::json;

struct Fixture {
    speaker: String,
    organizer: String,
    room_id: i64,
}

async fn setup(app: &TestApp) -> Fixture {
    app.create_user("Speaker", "s@conf.test", "password123", Role::Speaker)
        .await;
    app.create_user("Org", "o@conf.test", "password123", Role::Organizer)
        .await;

    let speaker = app.login("s@conf.test", "password123").await;
    let organizer = app.login("o@conf.test", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/rooms",
            Some(&organizer),
            Some(json!({"name": "Main Hall", "capacity": 200})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let room_id = parse_body(response).await["id"].as_i64().unwrap();

    Fixture {
        speaker,
        organizer,
        room_id,
    }
}

async fn accepted_talk(app: &TestApp, fx: &Fixture, title: &str) -> i64 {
    let response = app
        .request(
            "POST",
            "/api/v1/talks",
            Some(&fx.speaker),
            Some(json!({
                "title": title,
                "subject": "Rust",
                "description": "A talk about things.",
                "level": "advanced"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let talk_id = parse_body(response).await["id"].as_i64().unwrap();

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/talks/{}/status", talk_id),
            Some(&fx.organizer),
            Some(json!({"status": "accepted"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    talk_id
}

async fn schedule(
    app: &TestApp,
    fx: &Fixture,
    talk_id: i64,
    date: &str,
    start: &str,
    end: &str,
) -> axum::response::Response {
    app.request(
        "PUT",
        &format!("/api/v1/talks/{}/schedule", talk_id),
        Some(&fx.organizer),
        Some(json!({
            "scheduled_date": date,
            "start_time": start,
            "end_time": end,
            "room_id": fx.room_id
        })),
    )
    .await
}

#[tokio::test]
async fn test_schedule_accepted_talk_persists_slot() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let talk_id = accepted_talk(&app, &fx, "Borrow Checker Deep Dive").await;

    let response = schedule(&app, &fx, talk_id, "2026-10-01", "10:00", "11:00").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["status"], "scheduled");
    assert_eq!(body["scheduled_date"], "2026-10-01");
    assert_eq!(body["start_time"], "10:00:00");
    assert_eq!(body["end_time"], "11:00:00");
    assert_eq!(body["room_id"], fx.room_id);
}

#[tokio::test]
async fn test_overlapping_slot_in_same_room_conflicts() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let first = accepted_talk(&app, &fx, "First Talk").await;
    let second = accepted_talk(&app, &fx, "Second Talk").await;

    let response = schedule(&app, &fx, first, "2026-10-01", "10:00", "11:00").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = schedule(&app, &fx, second, "2026-10-01", "10:30", "11:30").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Room scheduling conflict detected");
}

#[tokio::test]
async fn test_containing_slot_conflicts() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let first = accepted_talk(&app, &fx, "Short Talk").await;
    let second = accepted_talk(&app, &fx, "Long Talk").await;

    schedule(&app, &fx, first, "2026-10-01", "11:00", "11:30").await;

    let response = schedule(&app, &fx, second, "2026-10-01", "10:00", "13:00").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_back_to_back_slots_do_not_conflict() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let first = accepted_talk(&app, &fx, "Morning Talk").await;
    let second = accepted_talk(&app, &fx, "Next Talk").await;

    let response = schedule(&app, &fx, first, "2026-10-01", "10:00", "11:00").await;
    assert_eq!(response.status(), StatusCode::OK);

    // One talk ending exactly when the next starts is fine.
    let response = schedule(&app, &fx, second, "2026-10-01", "11:00", "12:00").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_same_slot_other_day_does_not_conflict() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let first = accepted_talk(&app, &fx, "Day One").await;
    let second = accepted_talk(&app, &fx, "Day Two").await;

    schedule(&app, &fx, first, "2026-10-01", "10:00", "11:00").await;

    let response = schedule(&app, &fx, second, "2026-10-02", "10:00", "11:00").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_same_slot_other_room_does_not_conflict() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let first = accepted_talk(&app, &fx, "Hall A Talk").await;
    let second = accepted_talk(&app, &fx, "Hall B Talk").await;

    let response = app
        .request(
            "POST",
            "/api/v1/rooms",
            Some(&fx.organizer),
            Some(json!({"name": "Hall B", "capacity": 80})),
        )
        .await;
    let other_room = parse_body(response).await["id"].as_i64().unwrap();

    schedule(&app, &fx, first, "2026-10-01", "10:00", "11:00").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/talks/{}/schedule", second),
            Some(&fx.organizer),
            Some(json!({
                "scheduled_date": "2026-10-01",
                "start_time": "10:00",
                "end_time": "11:00",
                "room_id": other_room
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reschedule_ignores_own_existing_slot() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let talk_id = accepted_talk(&app, &fx, "Moving Target").await;

    let response = schedule(&app, &fx, talk_id, "2026-10-01", "10:00", "11:00").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Moving a scheduled talk must not collide with its own slot.
    let response = schedule(&app, &fx, talk_id, "2026-10-01", "10:30", "11:30").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["start_time"], "10:30:00");
}

#[tokio::test]
async fn test_repository_recheck_rejects_slot_taken_after_precheck() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let winner = accepted_talk(&app, &fx, "Winner").await;
    let loser = accepted_talk(&app, &fx, "Loser").await;

    let response = schedule(&app, &fx, winner, "2026-10-01", "10:00", "11:00").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Call the repository directly, as if the handler's conflict scan had
    // already passed before the winner committed its slot.
    let slot = ScheduleSlot {
        room_id: fx.room_id,
        date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        start_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
    };
    let result = app.state.talk_repo.schedule(loser, &slot).await;
    match result {
        Err(AppError::Conflict(msg)) => {
            assert_eq!(msg, "Room scheduling conflict detected")
        }
        other => panic!("expected Conflict, got {:?}", other.map(|t| t.id)),
    }

    // Nothing was written: the loser is still accepted and slot-free, so
    // the next free window goes through.
    let response = app
        .request(
            "GET",
            &format!("/api/v1/talks/{}", loser),
            Some(&fx.organizer),
            None,
        )
        .await;
    let body = parse_body(response).await;
    assert_eq!(body["status"], "accepted");
    assert!(body["room_id"].is_null());

    let response = schedule(&app, &fx, loser, "2026-10-01", "11:00", "12:00").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_repository_recheck_allows_adjacent_slot() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let first = accepted_talk(&app, &fx, "First").await;
    let second = accepted_talk(&app, &fx, "Second").await;

    let response = schedule(&app, &fx, first, "2026-10-01", "10:00", "11:00").await;
    assert_eq!(response.status(), StatusCode::OK);

    let slot = ScheduleSlot {
        room_id: fx.room_id,
        date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        start_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    };
    let scheduled = app
        .state
        .talk_repo
        .schedule(second, &slot)
        .await
        .expect("back-to-back slot must pass the repository check");
    assert_eq!(scheduled.room_id, Some(fx.room_id));
    assert_eq!(scheduled.start_time, Some(slot.start_time));
}

#[tokio::test]
async fn test_working_hours_boundaries() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;

    let cases = [
        ("09:00", "10:00", StatusCode::OK),
        ("18:00", "19:00", StatusCode::OK),
        ("08:59", "10:00", StatusCode::BAD_REQUEST),
        ("18:30", "19:01", StatusCode::BAD_REQUEST),
    ];

    for (i, (start, end, expected)) in cases.iter().enumerate() {
        let talk_id = accepted_talk(&app, &fx, &format!("Hours Case {}", i)).await;
        let date = format!("2026-11-{:02}", i + 1);
        let response = schedule(&app, &fx, talk_id, &date, start, end).await;
        assert_eq!(
            response.status(),
            *expected,
            "window {}-{} expected {}",
            start,
            end,
            expected
        );
    }
}

#[tokio::test]
async fn test_end_before_start_is_rejected() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let talk_id = accepted_talk(&app, &fx, "Backwards Talk").await;

    let response = schedule(&app, &fx, talk_id, "2026-10-01", "11:00", "10:00").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "end_time must be after start_time");

    let talk_id = accepted_talk(&app, &fx, "Zero Length Talk").await;
    let response = schedule(&app, &fx, talk_id, "2026-10-01", "11:00", "11:00").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_date_and_time_are_rejected() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let talk_id = accepted_talk(&app, &fx, "Format Victim").await;

    let response = schedule(&app, &fx, talk_id, "01/10/2026", "10:00", "11:00").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Invalid date format (YYYY-MM-DD)");

    let response = schedule(&app, &fx, talk_id, "2026-10-01", "10am", "11:00").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Invalid time format (HH:MM)");
}

#[tokio::test]
async fn test_schedule_requires_accepted_status() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;

    let response = app
        .request(
            "POST",
            "/api/v1/talks",
            Some(&fx.speaker),
            Some(json!({
                "title": "Still Pending",
                "subject": "Rust",
                "description": "Not reviewed yet.",
                "level": "beginner"
            })),
        )
        .await;
    let talk_id = parse_body(response).await["id"].as_i64().unwrap();

    let response = schedule(&app, &fx, talk_id, "2026-10-01", "10:00", "11:00").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Only accepted talks can be scheduled");
}

#[tokio::test]
async fn test_schedule_requires_existing_room() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let talk_id = accepted_talk(&app, &fx, "Roomless").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/talks/{}/schedule", talk_id),
            Some(&fx.organizer),
            Some(json!({
                "scheduled_date": "2026-10-01",
                "start_time": "10:00",
                "end_time": "11:00",
                "room_id": 9999
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Room not found");
}

#[tokio::test]
async fn test_speaker_cannot_schedule() {
    let app = TestApp::new().await;
    let fx = setup(&app).await;
    let talk_id = accepted_talk(&app, &fx, "Not Yours To Place").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/talks/{}/schedule", talk_id),
            Some(&fx.speaker),
            Some(json!({
                "scheduled_date": "2026-10-01",
                "start_time": "10:00",
                "end_time": "11:00",
                "room_id": fx.room_id
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
