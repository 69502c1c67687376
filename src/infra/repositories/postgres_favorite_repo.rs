use crate::domain::{
    models::{favorite::Favorite, talk::Talk},
    ports::FavoriteRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresFavoriteRepo {
    pool: PgPool,
}

impl PostgresFavoriteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepo {
    async fn add(&self, user_id: i64, talk_id: i64) -> Result<Favorite, AppError> {
        sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (user_id, talk_id, created_at) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(talk_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find(&self, user_id: i64, talk_id: i64) -> Result<Option<Favorite>, AppError> {
        sqlx::query_as::<_, Favorite>(
            "SELECT * FROM favorites WHERE user_id = $1 AND talk_id = $2",
        )
        .bind(user_id)
        .bind(talk_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn remove(&self, user_id: i64, talk_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND talk_id = $2")
            .bind(user_id)
            .bind(talk_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Favorite not found".into()));
        }
        Ok(())
    }

    async fn list_talks(&self, user_id: i64) -> Result<Vec<Talk>, AppError> {
        sqlx::query_as::<_, Talk>(
            "SELECT talks.* FROM talks
             JOIN favorites ON favorites.talk_id = talks.id
             WHERE favorites.user_id = $1
             ORDER BY favorites.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
