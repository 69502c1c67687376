use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{CreateSpeakerRequestRequest, UpdateSpeakerRequestRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::speaker_request::{NewSpeakerRequest, RequestStatus};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn create_request(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateSpeakerRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_description(&payload.description)?;

    let request = state
        .speaker_request_repo
        .create(&NewSpeakerRequest {
            user_id: user.id,
            phone: payload.phone,
            description: payload.description,
        })
        .await?;

    info!("Speaker request {} opened by user {}", request.id, user.id);

    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let requests = if user.role.can_manage_users() {
        state.speaker_request_repo.list_all().await?
    } else {
        state.speaker_request_repo.list_by_user(user.id).await?
    };

    Ok(Json(requests))
}

pub async fn get_request(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let request = state
        .speaker_request_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Speaker request not found".into()))?;

    if request.user_id != user.id && !user.role.can_manage_users() {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(request))
}

pub async fn update_request(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSpeakerRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_manage_users() {
        return Err(AppError::Unauthorized);
    }

    let mut request = state
        .speaker_request_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Speaker request not found".into()))?;

    if let Some(phone) = payload.phone {
        request.phone = Some(phone);
    }
    if let Some(description) = payload.description {
        validate_description(&description)?;
        request.description = description;
    }
    if let Some(status) = payload.status {
        request.status = match status.as_str() {
            "open" => RequestStatus::Open,
            "closed" => RequestStatus::Closed,
            _ => return Err(AppError::Validation("status must be open or closed".into())),
        };
    }

    let updated = state.speaker_request_repo.update(&request).await?;

    Ok(Json(updated))
}

pub async fn delete_request(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_manage_users() {
        return Err(AppError::Unauthorized);
    }

    state.speaker_request_repo.delete(id).await?;

    Ok(Json(serde_json::json!({"status": "deleted"})))
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() || description.len() > 1000 {
        return Err(AppError::Validation(
            "description must be between 1 and 1000 characters".into(),
        ));
    }
    Ok(())
}
