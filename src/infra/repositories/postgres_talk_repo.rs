use crate::domain::{
    models::talk::{NewTalk, ScheduleFilter, ScheduleSlot, Talk, TalkStatus},
    ports::TalkRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

pub struct PostgresTalkRepo {
    pool: PgPool,
}

impl PostgresTalkRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TalkRepository for PostgresTalkRepo {
    async fn create(&self, talk: &NewTalk) -> Result<Talk, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, Talk>(
            "INSERT INTO talks (title, subject, description, level, status, speaker_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&talk.title)
        .bind(&talk.subject)
        .bind(&talk.description)
        .bind(talk.level)
        .bind(TalkStatus::Pending)
        .bind(talk.speaker_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Talk>, AppError> {
        sqlx::query_as::<_, Talk>("SELECT * FROM talks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Talk>, AppError> {
        sqlx::query_as::<_, Talk>("SELECT * FROM talks ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_speaker(&self, speaker_id: i64) -> Result<Vec<Talk>, AppError> {
        sqlx::query_as::<_, Talk>(
            "SELECT * FROM talks WHERE speaker_id = $1 ORDER BY created_at DESC",
        )
        .bind(speaker_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_public(&self, filter: &ScheduleFilter) -> Result<Vec<Talk>, AppError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM talks WHERE status = ");
        qb.push_bind(TalkStatus::Scheduled);
        if let Some(date) = filter.date {
            qb.push(" AND scheduled_date = ").push_bind(date);
        }
        if let Some(room_id) = filter.room_id {
            qb.push(" AND room_id = ").push_bind(room_id);
        }
        if let Some(ref subject) = filter.subject {
            qb.push(" AND subject = ").push_bind(subject.clone());
        }
        if let Some(level) = filter.level {
            qb.push(" AND level = ").push_bind(level);
        }
        if let Some(speaker_id) = filter.speaker_id {
            qb.push(" AND speaker_id = ").push_bind(speaker_id);
        }
        qb.push(" ORDER BY scheduled_date ASC, start_time ASC");
        qb.build_query_as::<Talk>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_scheduled_in_room(
        &self,
        room_id: i64,
        date: NaiveDate,
        exclude_id: i64,
    ) -> Result<Vec<Talk>, AppError> {
        sqlx::query_as::<_, Talk>(
            "SELECT * FROM talks
             WHERE room_id = $1 AND scheduled_date = $2 AND status = $3 AND id != $4
             ORDER BY start_time ASC",
        )
        .bind(room_id)
        .bind(date)
        .bind(TalkStatus::Scheduled)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_content(&self, talk: &Talk) -> Result<Talk, AppError> {
        sqlx::query_as::<_, Talk>(
            "UPDATE talks SET title = $1, subject = $2, description = $3, level = $4, updated_at = $5
             WHERE id = $6
             RETURNING *",
        )
        .bind(&talk.title)
        .bind(&talk.subject)
        .bind(&talk.description)
        .bind(talk.level)
        .bind(Utc::now())
        .bind(talk.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_status(
        &self,
        id: i64,
        from: TalkStatus,
        to: TalkStatus,
    ) -> Result<Talk, AppError> {
        let updated = sqlx::query_as::<_, Talk>(
            "UPDATE talks SET status = $1, updated_at = $2 WHERE id = $3 AND status = $4 RETURNING *",
        )
        .bind(to)
        .bind(Utc::now())
        .bind(id)
        .bind(from)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        updated.ok_or_else(|| {
            AppError::InvalidTransition(format!(
                "Cannot transition talk from {} to {}",
                from.as_str(),
                to.as_str()
            ))
        })
    }

    async fn schedule(&self, id: i64, slot: &ScheduleSlot) -> Result<Talk, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Lock the room row so concurrent schedulers for the same room
        // serialize before the conflict count.
        sqlx::query("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(slot.room_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Room not found".to_string()))?;

        let conflicts: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM talks
             WHERE room_id = $1 AND scheduled_date = $2 AND status = $3
               AND id != $4 AND start_time < $5 AND end_time > $6",
        )
        .bind(slot.room_id)
        .bind(slot.date)
        .bind(TalkStatus::Scheduled)
        .bind(id)
        .bind(slot.end_time)
        .bind(slot.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if conflicts > 0 {
            return Err(AppError::Conflict(
                "Room scheduling conflict detected".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Talk>(
            "UPDATE talks
             SET scheduled_date = $1, start_time = $2, end_time = $3, room_id = $4, status = $5, updated_at = $6
             WHERE id = $7
             RETURNING *",
        )
        .bind(slot.date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.room_id)
        .bind(TalkStatus::Scheduled)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM talks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Talk not found".into()));
        }
        Ok(())
    }
}
