use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Closed,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SpeakerRequest {
    pub id: i64,
    pub user_id: i64,
    pub phone: Option<String>,
    pub description: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewSpeakerRequest {
    pub user_id: i64,
    pub phone: Option<String>,
    pub description: String,
}
