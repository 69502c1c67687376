use chrono::NaiveTime;
use crate::domain::models::talk::Talk;
use crate::error::AppError;

/// All scheduled windows must fall inside 09:00-19:00.
pub fn working_hours() -> (NaiveTime, NaiveTime) {
    (
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
    )
}

/// Half-open interval overlap: a talk ending at T never conflicts with one
/// starting at T.
pub fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && a_end > b_start
}

pub fn validate_window(start: NaiveTime, end: NaiveTime) -> Result<(), AppError> {
    if start >= end {
        return Err(AppError::Validation(
            "end_time must be after start_time".to_string(),
        ));
    }
    let (open, close) = working_hours();
    if start < open || end > close {
        return Err(AppError::OutOfHours(
            "Talk must be scheduled between 09:00 and 19:00".to_string(),
        ));
    }
    Ok(())
}

/// Scans already scheduled talks in the target room/date for a window
/// collision. Candidates without a stored window are skipped; those rows
/// violate the scheduled-talk invariant and never match.
pub fn find_conflict(start: NaiveTime, end: NaiveTime, others: &[Talk]) -> Option<&Talk> {
    others.iter().find(|other| match (other.start_time, other.end_time) {
        (Some(other_start), Some(other_end)) => overlaps(start, end, other_start, other_end),
        _ => false,
    })
}
