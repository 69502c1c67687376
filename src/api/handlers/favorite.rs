use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(talk_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .talk_repo
        .find_by_id(talk_id)
        .await?
        .ok_or(AppError::NotFound("Talk not found".into()))?;

    if state.favorite_repo.find(user.id, talk_id).await?.is_some() {
        return Err(AppError::Conflict("Talk already in favorites".into()));
    }

    let favorite = state.favorite_repo.add(user.id, talk_id).await?;

    info!("User {} favorited talk {}", user.id, talk_id);

    Ok((StatusCode::CREATED, Json(favorite)))
}

pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(talk_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .favorite_repo
        .remove(user.id, talk_id)
        .await
        .map_err(|err| match err {
            AppError::NotFound(_) => AppError::NotFound("Favorite not found".into()),
            other => other,
        })?;

    Ok(Json(serde_json::json!({"status": "removed"})))
}

pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let talks = state.favorite_repo.list_talks(user.id).await?;
    Ok(Json(talks))
}
