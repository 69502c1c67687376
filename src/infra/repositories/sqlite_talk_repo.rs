use crate::domain::{
    models::talk::{NewTalk, ScheduleFilter, ScheduleSlot, Talk, TalkStatus},
    ports::TalkRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteTalkRepo {
    pool: SqlitePool,
}

impl SqliteTalkRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TalkRepository for SqliteTalkRepo {
    async fn create(&self, talk: &NewTalk) -> Result<Talk, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, Talk>(
            "INSERT INTO talks (title, subject, description, level, status, speaker_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
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
        sqlx::query_as::<_, Talk>("SELECT * FROM talks WHERE id = ?")
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
            "SELECT * FROM talks WHERE speaker_id = ? ORDER BY created_at DESC",
        )
        .bind(speaker_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_public(&self, filter: &ScheduleFilter) -> Result<Vec<Talk>, AppError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM talks WHERE status = ");
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
             WHERE room_id = ? AND scheduled_date = ? AND status = ? AND id != ?
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
            "UPDATE talks SET title = ?, subject = ?, description = ?, level = ?, updated_at = ?
             WHERE id = ?
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
            "UPDATE talks SET status = ?, updated_at = ? WHERE id = ? AND status = ? RETURNING *",
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
        // Conflict check and write as one statement: SQLite serializes
        // writers, so a concurrent scheduler for the same room/date cannot
        // interleave between the two.
        let updated = sqlx::query_as::<_, Talk>(
            "UPDATE talks
             SET scheduled_date = ?, start_time = ?, end_time = ?, room_id = ?, status = ?, updated_at = ?
             WHERE id = ?
               AND NOT EXISTS (
                   SELECT 1 FROM talks other
                   WHERE other.room_id = ? AND other.scheduled_date = ? AND other.status = ?
                     AND other.id != ? AND other.start_time < ? AND other.end_time > ?
               )
             RETURNING *",
        )
        .bind(slot.date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.room_id)
        .bind(TalkStatus::Scheduled)
        .bind(Utc::now())
        .bind(id)
        .bind(slot.room_id)
        .bind(slot.date)
        .bind(TalkStatus::Scheduled)
        .bind(id)
        .bind(slot.end_time)
        .bind(slot.start_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        updated.ok_or_else(|| AppError::Conflict("Room scheduling conflict detected".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM talks WHERE id = ?")
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
