use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{
    CreateTalkRequest, PublicScheduleQuery, ScheduleTalkRequest, UpdateTalkRequest,
    UpdateTalkStatusRequest,
};
use crate::api::dtos::responses::ScheduledTalkResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::talk::{
    NewTalk, ScheduleFilter, ScheduleSlot, Talk, TalkLevel, TalkStatus,
};
use crate::domain::services::scheduling::{find_conflict, validate_window};
use crate::domain::services::transitions::{attempt_transition, ensure_owner_can_modify};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

pub async fn create_talk(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateTalkRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_submit_talks() {
        return Err(AppError::Unauthorized);
    }

    validate_title(&payload.title)?;
    validate_subject(&payload.subject)?;
    validate_description(&payload.description)?;
    let level = parse_level(&payload.level)?;

    let talk = state
        .talk_repo
        .create(&NewTalk {
            title: payload.title,
            subject: payload.subject,
            description: payload.description,
            level,
            speaker_id: user.id,
        })
        .await?;

    info!("Talk created: {} by speaker {}", talk.id, talk.speaker_id);

    Ok((StatusCode::CREATED, Json(talk)))
}

pub async fn list_talks(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_submit_talks() {
        return Err(AppError::Unauthorized);
    }

    // Speakers only see their own proposals; organizers see everything.
    let talks = if user.role.can_manage_schedule() {
        state.talk_repo.list_all().await?
    } else {
        state.talk_repo.list_by_speaker(user.id).await?
    };

    Ok(Json(talks))
}

pub async fn get_talk(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let talk = find_talk(&state, id).await?;

    if talk.speaker_id != user.id && !user.role.can_manage_schedule() {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(talk))
}

pub async fn update_talk(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTalkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut talk = find_talk(&state, id).await?;

    ensure_owner_can_modify(&talk, user.id, "updated")?;

    if let Some(title) = payload.title {
        validate_title(&title)?;
        talk.title = title;
    }
    if let Some(subject) = payload.subject {
        validate_subject(&subject)?;
        talk.subject = subject;
    }
    if let Some(description) = payload.description {
        validate_description(&description)?;
        talk.description = description;
    }
    if let Some(level) = payload.level {
        talk.level = parse_level(&level)?;
    }

    let updated = state.talk_repo.update_content(&talk).await?;

    Ok(Json(updated))
}

pub async fn delete_talk(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let talk = find_talk(&state, id).await?;

    ensure_owner_can_modify(&talk, user.id, "deleted")?;

    state.talk_repo.delete(talk.id).await?;

    info!("Talk deleted: {}", talk.id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn update_talk_status(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTalkStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let talk = find_talk(&state, id).await?;

    // Scheduling is the only way to reach `scheduled`, so this endpoint
    // accepts two target values.
    let requested = match payload.status.as_str() {
        "accepted" => TalkStatus::Accepted,
        "rejected" => TalkStatus::Rejected,
        _ => {
            return Err(AppError::Validation(
                "status must be accepted or rejected".into(),
            ))
        }
    };

    attempt_transition(talk.status, requested, user.role)?;

    let updated = state
        .talk_repo
        .update_status(talk.id, talk.status, requested)
        .await?;

    info!(
        "Talk {} transitioned from {} to {}",
        updated.id,
        talk.status.as_str(),
        requested.as_str()
    );

    Ok(Json(updated))
}

pub async fn schedule_talk(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ScheduleTalkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let talk = find_talk(&state, id).await?;

    if !user.role.can_manage_schedule() {
        return Err(AppError::Unauthorized);
    }

    // Scheduled talks may be moved to a new slot; anything else must be
    // accepted first.
    if !matches!(talk.status, TalkStatus::Accepted | TalkStatus::Scheduled) {
        return Err(AppError::InvalidState(
            "Only accepted talks can be scheduled".into(),
        ));
    }

    let room = state
        .room_repo
        .find_by_id(payload.room_id)
        .await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let date = NaiveDate::parse_from_str(&payload.scheduled_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;
    let start_time = parse_time(&payload.start_time)?;
    let end_time = parse_time(&payload.end_time)?;

    validate_window(start_time, end_time)?;

    let existing = state
        .talk_repo
        .list_scheduled_in_room(room.id, date, talk.id)
        .await?;

    if let Some(other) = find_conflict(start_time, end_time, &existing) {
        warn!(
            "Scheduling conflict: talk {} vs talk {} in room {} on {}",
            talk.id, other.id, room.id, date
        );
        return Err(AppError::Conflict(
            "Room scheduling conflict detected".into(),
        ));
    }

    // The repository re-checks the window inside a transaction, closing the
    // race between the read above and the write.
    let scheduled = state
        .talk_repo
        .schedule(
            talk.id,
            &ScheduleSlot {
                room_id: room.id,
                date,
                start_time,
                end_time,
            },
        )
        .await?;

    info!(
        "Talk {} scheduled in room {} on {} {}-{}",
        scheduled.id, room.id, date, payload.start_time, payload.end_time
    );

    Ok(Json(scheduled))
}

pub async fn public_index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PublicScheduleQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = match query.date {
        Some(raw) => Some(
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?,
        ),
        None => None,
    };
    let level = match query.level {
        Some(raw) => Some(parse_level(&raw)?),
        None => None,
    };

    let filter = ScheduleFilter {
        date,
        room_id: query.room_id,
        subject: query.subject,
        level,
        speaker_id: query.speaker_id,
    };

    let talks = state.talk_repo.list_public(&filter).await?;
    let schedule: Vec<ScheduledTalkResponse> =
        talks.into_iter().map(ScheduledTalkResponse::from).collect();

    Ok(Json(schedule))
}

async fn find_talk(state: &Arc<AppState>, id: i64) -> Result<Talk, AppError> {
    state
        .talk_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Talk not found".into()))
}

fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

fn parse_level(raw: &str) -> Result<TalkLevel, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation("level must be beginner, intermediate or advanced".into()))
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() || title.len() > 255 {
        return Err(AppError::Validation(
            "title must be between 1 and 255 characters".into(),
        ));
    }
    Ok(())
}

fn validate_subject(subject: &str) -> Result<(), AppError> {
    if subject.trim().is_empty() || subject.len() > 100 {
        return Err(AppError::Validation(
            "subject must be between 1 and 100 characters".into(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation("description is required".into()));
    }
    Ok(())
}
