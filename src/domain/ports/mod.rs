use crate::domain::models::{
    favorite::Favorite,
    room::{NewRoom, Room},
    speaker_request::{NewSpeakerRequest, SpeakerRequest},
    talk::{NewTalk, ScheduleFilter, ScheduleSlot, Talk, TalkStatus},
    user::{NewUser, Role, User},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update_role(&self, id: i64, role: Role) -> Result<User, AppError>;
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &NewRoom) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Room>, AppError>;
    async fn list(&self) -> Result<Vec<Room>, AppError>;
    async fn update(&self, room: &Room) -> Result<Room, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait TalkRepository: Send + Sync {
    async fn create(&self, talk: &NewTalk) -> Result<Talk, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Talk>, AppError>;
    async fn list_all(&self) -> Result<Vec<Talk>, AppError>;
    async fn list_by_speaker(&self, speaker_id: i64) -> Result<Vec<Talk>, AppError>;
    async fn list_public(&self, filter: &ScheduleFilter) -> Result<Vec<Talk>, AppError>;
    async fn list_scheduled_in_room(
        &self,
        room_id: i64,
        date: NaiveDate,
        exclude_id: i64,
    ) -> Result<Vec<Talk>, AppError>;
    async fn update_content(&self, talk: &Talk) -> Result<Talk, AppError>;
    /// Conditional write: only succeeds while the talk still has `from`,
    /// so a concurrent transition loses instead of being overwritten.
    async fn update_status(
        &self,
        id: i64,
        from: TalkStatus,
        to: TalkStatus,
    ) -> Result<Talk, AppError>;
    /// Atomic conflict re-check and write; fails with Conflict when another
    /// scheduled talk claimed an overlapping window first.
    async fn schedule(&self, id: i64, slot: &ScheduleSlot) -> Result<Talk, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn add(&self, user_id: i64, talk_id: i64) -> Result<Favorite, AppError>;
    async fn find(&self, user_id: i64, talk_id: i64) -> Result<Option<Favorite>, AppError>;
    async fn remove(&self, user_id: i64, talk_id: i64) -> Result<(), AppError>;
    async fn list_talks(&self, user_id: i64) -> Result<Vec<Talk>, AppError>;
}

#[async_trait]
pub trait SpeakerRequestRepository: Send + Sync {
    async fn create(&self, request: &NewSpeakerRequest) -> Result<SpeakerRequest, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<SpeakerRequest>, AppError>;
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<SpeakerRequest>, AppError>;
    async fn list_all(&self) -> Result<Vec<SpeakerRequest>, AppError>;
    async fn update(&self, request: &SpeakerRequest) -> Result<SpeakerRequest, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
