pub mod postgres_favorite_repo;
pub mod postgres_room_repo;
pub mod postgres_speaker_request_repo;
pub mod postgres_talk_repo;
pub mod postgres_user_repo;
pub mod sqlite_favorite_repo;
pub mod sqlite_room_repo;
pub mod sqlite_speaker_request_repo;
pub mod sqlite_talk_repo;
pub mod sqlite_user_repo;
