mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use conference_backend::domain::models::user::Role;
use serde_json::json;

#[tokio::test]
async fn test_organizer_manages_rooms() {
    let app = TestApp::new().await;
    app.create_user("Org", "o@conf.test", "password123", Role::Organizer)
        .await;
    let organizer = app.login("o@conf.test", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/rooms",
            Some(&organizer),
            Some(json!({"name": "Auditorium", "capacity": 300})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let room_id = parse_body(response).await["id"].as_i64().unwrap();

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/rooms/{}", room_id),
            Some(&organizer),
            Some(json!({"capacity": 250})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["capacity"], 250);
    assert_eq!(body["name"], "Auditorium");

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/rooms/{}", room_id),
            Some(&organizer),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/v1/rooms/{}", room_id),
            Some(&organizer),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_room_capacity_must_be_positive() {
    let app = TestApp::new().await;
    app.create_user("Org", "o@conf.test", "password123", Role::Organizer)
        .await;
    let organizer = app.login("o@conf.test", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/rooms",
            Some(&organizer),
            Some(json!({"name": "Closet", "capacity": 0})),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "capacity must be at least 1");
}

#[tokio::test]
async fn test_speaker_can_view_but_not_mutate_rooms() {
    let app = TestApp::new().await;
    app.create_user("Org", "o@conf.test", "password123", Role::Organizer)
        .await;
    app.create_user("Speaker", "s@conf.test", "password123", Role::Speaker)
        .await;

    let organizer = app.login("o@conf.test", "password123").await;
    let speaker = app.login("s@conf.test", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/rooms",
            Some(&organizer),
            Some(json!({"name": "Lab", "capacity": 40})),
        )
        .await;
    let room_id = parse_body(response).await["id"].as_i64().unwrap();

    let response = app.request("GET", "/api/v1/rooms", Some(&speaker), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = app
        .request(
            "POST",
            "/api/v1/rooms",
            Some(&speaker),
            Some(json!({"name": "Rogue Room", "capacity": 10})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/rooms/{}", room_id),
            Some(&speaker),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_room_name_conflicts() {
    let app = TestApp::new().await;
    app.create_user("Org", "o@conf.test", "password123", Role::Organizer)
        .await;
    let organizer = app.login("o@conf.test", "password123").await;

    let payload = json!({"name": "Main Hall", "capacity": 100});

    let response = app
        .request("POST", "/api/v1/rooms", Some(&organizer), Some(payload.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request("POST", "/api/v1/rooms", Some(&organizer), Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
