use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    FavoriteRepository, RoomRepository, SpeakerRequestRepository, TalkRepository, UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub room_repo: Arc<dyn RoomRepository>,
    pub talk_repo: Arc<dyn TalkRepository>,
    pub favorite_repo: Arc<dyn FavoriteRepository>,
    pub speaker_request_repo: Arc<dyn SpeakerRequestRepository>,
}
