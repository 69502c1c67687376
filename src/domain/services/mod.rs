pub mod scheduling;
pub mod transitions;
