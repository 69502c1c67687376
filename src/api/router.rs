use axum::{
    body::Body,
    extract::Request,
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, favorite, health, room, speaker_request, talk, user};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))

        // Public schedule
        .route("/api/v1/public/talks", get(talk::public_index))

        // Talks
        .route("/api/v1/talks", post(talk::create_talk).get(talk::list_talks))
        .route("/api/v1/talks/{id}", get(talk::get_talk).put(talk::update_talk).delete(talk::delete_talk))
        .route("/api/v1/talks/{id}/status", put(talk::update_talk_status))
        .route("/api/v1/talks/{id}/schedule", put(talk::schedule_talk))

        // Favorites
        .route("/api/v1/talks/{id}/favorite", post(favorite::add_favorite).delete(favorite::remove_favorite))
        .route("/api/v1/user/favorites", get(favorite::list_favorites))

        // Rooms
        .route("/api/v1/rooms", get(room::list_rooms).post(room::create_room))
        .route("/api/v1/rooms/{id}", get(room::get_room).put(room::update_room).delete(room::delete_room))

        // Users
        .route("/api/v1/users", get(user::list_users))
        .route("/api/v1/users/{id}/promote-to-speaker", patch(user::promote_to_speaker))
        .route("/api/v1/users/{id}/demote-to-public", patch(user::demote_to_public))

        // Speaker requests
        .route("/api/v1/speaker-requests", post(speaker_request::create_request).get(speaker_request::list_requests))
        .route("/api/v1/speaker-requests/{id}", get(speaker_request::get_request).put(speaker_request::update_request).delete(speaker_request::delete_request))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
