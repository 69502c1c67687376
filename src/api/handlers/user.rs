use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::Role;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_manage_users() {
        return Err(AppError::Unauthorized);
    }

    let users = state.user_repo.list().await?;
    Ok(Json(users))
}

pub async fn promote_to_speaker(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_manage_users() {
        return Err(AppError::Unauthorized);
    }

    let target = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if target.role != Role::Public {
        return Err(AppError::InvalidState(
            "Only public users can be promoted to speaker".into(),
        ));
    }

    let promoted = state.user_repo.update_role(target.id, Role::Speaker).await?;

    info!("User {} promoted to speaker by {}", promoted.id, user.id);

    Ok(Json(promoted))
}

pub async fn demote_to_public(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_manage_users() {
        return Err(AppError::Unauthorized);
    }

    let target = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if target.role != Role::Speaker {
        return Err(AppError::InvalidState(
            "Only speakers can be demoted to public".into(),
        ));
    }

    let demoted = state.user_repo.update_role(target.id, Role::Public).await?;

    info!("User {} demoted to public by {}", demoted.id, user.id);

    Ok(Json(demoted))
}
