use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::activity::PlannedActivity;
use crate::models::itinerary::{DayPlan, Itinerary};

/// One overlapping pair on a day's timeline.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Conflict {
    pub date: NaiveDate,
    pub first: Uuid,
    pub second: Uuid,
    pub overlap_minutes: i64,
}

/// Invariant guard over day schedules.
///
/// Usable right after generation and again after any structural mutation.
/// It only reports; repairing a broken schedule is the caller's job,
/// normally by re-running the day's packing step.
pub struct ConflictChecker;

impl ConflictChecker {
    /// Scan one day for overlapping activity intervals.
    ///
    /// Activities are compared closed-open on `[start, end)`: sort by start
    /// time, then report every adjacent pair where the earlier end exceeds
    /// the later start.
    pub fn day_conflicts(day: &DayPlan) -> Vec<Conflict> {
        let mut sorted: Vec<&PlannedActivity> = day.activities.iter().collect();
        sorted.sort_by_key(|a| a.start_time);

        let mut conflicts = Vec::new();
        for pair in sorted.windows(2) {
            if pair[0].end_time > pair[1].start_time {
                conflicts.push(Conflict {
                    date: day.date,
                    first: pair[0].activity.id,
                    second: pair[1].activity.id,
                    overlap_minutes: (pair[0].end_time - pair[1].start_time).num_minutes(),
                });
            }
        }
        conflicts
    }

    pub fn itinerary_conflicts(itinerary: &Itinerary) -> Vec<Conflict> {
        itinerary.days.iter().flat_map(Self::day_conflicts).collect()
    }

    pub fn day_has_conflicts(day: &DayPlan) -> bool {
        !Self::day_conflicts(day).is_empty()
    }

    pub fn has_conflicts(itinerary: &Itinerary) -> bool {
        itinerary.days.iter().any(Self::day_has_conflicts)
    }
}
