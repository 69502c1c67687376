use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateTalkRequest {
    pub title: String,
    pub subject: String,
    pub description: String,
    pub level: String,
}

#[derive(Deserialize)]
pub struct UpdateTalkRequest {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTalkStatusRequest {
    pub status: String,
}

/// Times arrive as strings so the handler controls parse order and the
/// error kind (a bad HH:MM is a validation failure, not a 422 body reject).
#[derive(Deserialize)]
pub struct ScheduleTalkRequest {
    pub scheduled_date: String,
    pub start_time: String,
    pub end_time: String,
    pub room_id: i64,
}

#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub capacity: i32,
}

#[derive(Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateSpeakerRequestRequest {
    pub phone: Option<String>,
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateSpeakerRequestRequest {
    pub phone: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct PublicScheduleQuery {
    pub date: Option<String>,
    pub room_id: Option<i64>,
    pub subject: Option<String>,
    pub level: Option<String>,
    pub speaker_id: Option<i64>,
}
