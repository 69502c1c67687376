pub mod auth;
pub mod favorite;
pub mod health;
pub mod room;
pub mod speaker_request;
pub mod talk;
pub mod user;
