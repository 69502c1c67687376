use crate::domain::{
    models::speaker_request::{NewSpeakerRequest, RequestStatus, SpeakerRequest},
    ports::SpeakerRequestRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresSpeakerRequestRepo {
    pool: PgPool,
}

impl PostgresSpeakerRequestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpeakerRequestRepository for PostgresSpeakerRequestRepo {
    async fn create(&self, request: &NewSpeakerRequest) -> Result<SpeakerRequest, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, SpeakerRequest>(
            "INSERT INTO speaker_requests (user_id, phone, description, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(request.user_id)
        .bind(&request.phone)
        .bind(&request.description)
        .bind(RequestStatus::Open)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SpeakerRequest>, AppError> {
        sqlx::query_as::<_, SpeakerRequest>("SELECT * FROM speaker_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<SpeakerRequest>, AppError> {
        sqlx::query_as::<_, SpeakerRequest>(
            "SELECT * FROM speaker_requests WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<SpeakerRequest>, AppError> {
        sqlx::query_as::<_, SpeakerRequest>(
            "SELECT * FROM speaker_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, request: &SpeakerRequest) -> Result<SpeakerRequest, AppError> {
        sqlx::query_as::<_, SpeakerRequest>(
            "UPDATE speaker_requests SET phone = $1, description = $2, status = $3, updated_at = $4
             WHERE id = $5
             RETURNING *",
        )
        .bind(&request.phone)
        .bind(&request.description)
        .bind(request.status)
        .bind(Utc::now())
        .bind(request.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM speaker_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Speaker request not found".into()));
        }
        Ok(())
    }
}
