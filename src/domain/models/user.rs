use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Public,
    Speaker,
    Organizer,
    Superadmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Public => "public",
            Role::Speaker => "speaker",
            Role::Organizer => "organizer",
            Role::Superadmin => "superadmin",
        }
    }

    /// Accept/reject/schedule talks and manage rooms.
    pub fn can_manage_schedule(&self) -> bool {
        matches!(self, Role::Organizer | Role::Superadmin)
    }

    pub fn can_submit_talks(&self) -> bool {
        matches!(self, Role::Speaker | Role::Organizer | Role::Superadmin)
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Organizer | Role::Superadmin)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}
