use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{CreateRoomRequest, UpdateRoomRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::room::NewRoom;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_manage_schedule() {
        return Err(AppError::Unauthorized);
    }

    validate_name(&payload.name)?;
    validate_capacity(payload.capacity)?;

    let room = state
        .room_repo
        .create(&NewRoom {
            name: payload.name,
            capacity: payload.capacity,
        })
        .await?;

    info!("Room created: {} ({} seats)", room.name, room.capacity);

    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list().await?;
    Ok(Json(rooms))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let room = state
        .room_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Room not found".into()))?;
    Ok(Json(room))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_manage_schedule() {
        return Err(AppError::Unauthorized);
    }

    let mut room = state
        .room_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    if let Some(name) = payload.name {
        validate_name(&name)?;
        room.name = name;
    }
    if let Some(capacity) = payload.capacity {
        validate_capacity(capacity)?;
        room.capacity = capacity;
    }

    let updated = state.room_repo.update(&room).await?;

    Ok(Json(updated))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_manage_schedule() {
        return Err(AppError::Unauthorized);
    }

    state.room_repo.delete(id).await?;

    info!("Room deleted: {}", id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || name.len() > 255 {
        return Err(AppError::Validation(
            "name must be between 1 and 255 characters".into(),
        ));
    }
    Ok(())
}

fn validate_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity < 1 {
        return Err(AppError::Validation("capacity must be at least 1".into()));
    }
    Ok(())
}
