use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TalkStatus {
    Pending,
    Accepted,
    Rejected,
    Scheduled,
}

impl TalkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TalkStatus::Pending => "pending",
            TalkStatus::Accepted => "accepted",
            TalkStatus::Rejected => "rejected",
            TalkStatus::Scheduled => "scheduled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TalkLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::str::FromStr for TalkLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(TalkLevel::Beginner),
            "intermediate" => Ok(TalkLevel::Intermediate),
            "advanced" => Ok(TalkLevel::Advanced),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Talk {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub level: TalkLevel,
    pub status: TalkStatus,
    pub speaker_id: i64,
    pub scheduled_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub room_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Talk {
    /// Display-only value. The stored start/end pair is canonical.
    pub fn duration_minutes(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((end - start).num_minutes()),
            _ => None,
        }
    }
}

pub struct NewTalk {
    pub title: String,
    pub subject: String,
    pub description: String,
    pub level: TalkLevel,
    pub speaker_id: i64,
}

/// Target slot for the schedule operation, already validated by the
/// scheduling service.
pub struct ScheduleSlot {
    pub room_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Default)]
pub struct ScheduleFilter {
    pub date: Option<NaiveDate>,
    pub room_id: Option<i64>,
    pub subject: Option<String>,
    pub level: Option<TalkLevel>,
    pub speaker_id: Option<i64>,
}
