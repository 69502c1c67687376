use crate::domain::models::talk::{Talk, TalkStatus};
use crate::domain::models::user::Role;
use crate::error::AppError;

/// Transition table over talk statuses. `accepted -> scheduled` is only
/// reachable through the schedule operation, which sets the room and time
/// fields in the same write.
pub fn allowed_transitions(from: TalkStatus) -> &'static [TalkStatus] {
    match from {
        TalkStatus::Pending => &[TalkStatus::Accepted, TalkStatus::Rejected],
        TalkStatus::Accepted => &[TalkStatus::Scheduled],
        TalkStatus::Rejected | TalkStatus::Scheduled => &[],
    }
}

/// Authorizes a status change. Role is checked before reachability so a
/// speaker probing an illegal transition still gets a 403.
pub fn attempt_transition(
    current: TalkStatus,
    requested: TalkStatus,
    role: Role,
) -> Result<(), AppError> {
    if !role.can_manage_schedule() {
        return Err(AppError::Unauthorized);
    }
    if !allowed_transitions(current).contains(&requested) {
        return Err(AppError::InvalidTransition(format!(
            "Cannot transition talk from {} to {}",
            current.as_str(),
            requested.as_str()
        )));
    }
    Ok(())
}

/// Content edits and deletion: owner only, and only while pending.
pub fn ensure_owner_can_modify(talk: &Talk, user_id: i64, action: &str) -> Result<(), AppError> {
    if talk.speaker_id != user_id {
        return Err(AppError::Unauthorized);
    }
    if talk.status != TalkStatus::Pending {
        return Err(AppError::InvalidState(format!(
            "Only pending talks can be {action}"
        )));
    }
    Ok(())
}
