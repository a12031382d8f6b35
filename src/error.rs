use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::services::conflict_service::Conflict;

/// Errors surfaced by the itinerary engine.
///
/// Validation errors describe bad input and are always returned to the
/// caller rather than silently corrected. A `ScheduleConflict` is different:
/// it means an operation would have left overlapping activities on a day,
/// which points at a scheduling bug, not at the request.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("invalid date range: {end} is before {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("missing required preference field: {0}")]
    MissingPreference(&'static str),

    #[error("invalid day index {index} for a {day_count}-day itinerary")]
    InvalidDayIndex { index: usize, day_count: usize },

    #[error("activity {0} not found on the requested day")]
    ActivityNotFound(Uuid),

    #[error("day {date} would exceed the {max_minutes}-minute activity budget")]
    DailyBudgetExceeded { date: NaiveDate, max_minutes: u32 },

    #[error(
        "schedule conflict on {}: activities {} and {} overlap by {} minutes",
        .0.date, .0.first, .0.second, .0.overlap_minutes
    )]
    ScheduleConflict(Conflict),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// True for invariant violations, false for plain validation errors.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, PlannerError::ScheduleConflict(_))
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            PlannerError::MissingPreference(_) => "MISSING_PREFERENCE",
            PlannerError::InvalidDayIndex { .. } => "INVALID_DAY_INDEX",
            PlannerError::ActivityNotFound(_) => "ACTIVITY_NOT_FOUND",
            PlannerError::DailyBudgetExceeded { .. } => "DAILY_BUDGET_EXCEEDED",
            PlannerError::ScheduleConflict(_) => "SCHEDULE_CONFLICT",
        }
    }
}
