use serde::Serialize;
use crate::domain::models::talk::Talk;

/// Public schedule entry: the talk plus its display duration, derived from
/// the stored start/end pair.
#[derive(Serialize)]
pub struct ScheduledTalkResponse {
    #[serde(flatten)]
    pub talk: Talk,
    pub duration_minutes: Option<i64>,
}

impl From<Talk> for ScheduledTalkResponse {
    fn from(talk: Talk) -> Self {
        let duration_minutes = talk.duration_minutes();
        Self {
            talk,
            duration_minutes,
        }
    }
}
