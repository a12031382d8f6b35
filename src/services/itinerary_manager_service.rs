use chrono::{Duration, NaiveTime};
use log::info;
use uuid::Uuid;

use crate::error::PlannerError;
use crate::models::activity::PlannedActivity;
use crate::models::itinerary::{DayPlan, Itinerary};
use crate::services::conflict_service::{Conflict, ConflictChecker};
use crate::services::day_planner_service::DayPlannerConfig;

/// Structural mutations on an existing itinerary: add, remove and move
/// activities, plus the post-mutation repack.
///
/// Every operation validates first and commits second — a rejected call
/// leaves the itinerary exactly as it was. Overlap rejections surface as
/// `ScheduleConflict` so callers can tell a scheduling bug from bad input.
pub struct ItineraryManager {
    config: DayPlannerConfig,
}

impl ItineraryManager {
    pub fn new() -> Self {
        Self {
            config: DayPlannerConfig::default(),
        }
    }

    pub fn with_config(config: DayPlannerConfig) -> Self {
        Self { config }
    }

    /// Insert an activity into a day, keeping the day ordered by start time.
    pub fn add_activity(
        &self,
        itinerary: &mut Itinerary,
        day_index: usize,
        activity: PlannedActivity,
    ) -> Result<(), PlannerError> {
        let day_count = itinerary.days.len();
        let day = itinerary
            .days
            .get_mut(day_index)
            .ok_or(PlannerError::InvalidDayIndex {
                index: day_index,
                day_count,
            })?;

        check_fits(day, &activity, self.config.max_daily_minutes)?;

        insert_sorted(day, activity);
        itinerary.recalculate_total_cost();
        Ok(())
    }

    /// Remove an activity from a day and return it.
    pub fn remove_activity(
        &self,
        itinerary: &mut Itinerary,
        day_index: usize,
        activity_id: Uuid,
    ) -> Result<PlannedActivity, PlannerError> {
        let day_count = itinerary.days.len();
        let day = itinerary
            .days
            .get_mut(day_index)
            .ok_or(PlannerError::InvalidDayIndex {
                index: day_index,
                day_count,
            })?;

        let position = day
            .activities
            .iter()
            .position(|a| a.activity.id == activity_id)
            .ok_or(PlannerError::ActivityNotFound(activity_id))?;

        let removed = day.activities.remove(position);
        itinerary.recalculate_total_cost();
        Ok(removed)
    }

    /// Move an activity to another day, keeping its time of day.
    ///
    /// The target day is checked before anything is touched; on rejection
    /// both days are unchanged. The caller decides whether to repack the
    /// source day afterwards.
    pub fn move_activity(
        &self,
        itinerary: &mut Itinerary,
        from_day: usize,
        to_day: usize,
        activity_id: Uuid,
    ) -> Result<(), PlannerError> {
        let day_count = itinerary.days.len();
        for index in [from_day, to_day] {
            if index >= day_count {
                return Err(PlannerError::InvalidDayIndex { index, day_count });
            }
        }

        let position = itinerary.days[from_day]
            .activities
            .iter()
            .position(|a| a.activity.id == activity_id)
            .ok_or(PlannerError::ActivityNotFound(activity_id))?;

        if from_day == to_day {
            // Same day, same time of day: nothing to do.
            return Ok(());
        }

        // Re-date onto the target day before validating against it.
        let mut moved = itinerary.days[from_day].activities[position].clone();
        let target_date = itinerary.days[to_day].date;
        moved.start_time = target_date.and_time(moved.start_time.time());
        moved.end_time = moved.start_time + Duration::minutes(moved.activity.duration_minutes as i64);

        check_fits(&itinerary.days[to_day], &moved, self.config.max_daily_minutes)?;

        itinerary.days[from_day].activities.remove(position);
        insert_sorted(&mut itinerary.days[to_day], moved);

        info!(
            "moved activity {} from day {} to day {}",
            activity_id, from_day, to_day
        );
        Ok(())
    }

    /// Re-pack one day's activities back-to-back from the day-start anchor
    /// in chronological order. Run after mutations instead of persisting
    /// gaps; overlapping state must never be left behind.
    pub fn repack_day(
        &self,
        itinerary: &mut Itinerary,
        day_index: usize,
    ) -> Result<(), PlannerError> {
        let day_count = itinerary.days.len();
        let day = itinerary
            .days
            .get_mut(day_index)
            .ok_or(PlannerError::InvalidDayIndex {
                index: day_index,
                day_count,
            })?;

        repack(day, self.config.day_start);
        Ok(())
    }

    /// Repack every day of the trip.
    pub fn reoptimize(&self, itinerary: &mut Itinerary) {
        for day in &mut itinerary.days {
            repack(day, self.config.day_start);
        }
    }

    /// Value-level copy with a fresh identity; storing it is the persistence
    /// collaborator's job.
    pub fn clone_itinerary(&self, itinerary: &Itinerary) -> Itinerary {
        let mut copy = itinerary.clone();
        copy.id = Uuid::new_v4();
        copy.title = format!("Copy of {}", itinerary.title);
        copy
    }
}

impl Default for ItineraryManager {
    fn default() -> Self {
        Self::new()
    }
}

fn check_fits(
    day: &DayPlan,
    activity: &PlannedActivity,
    max_daily_minutes: u32,
) -> Result<(), PlannerError> {
    if let Some(existing) = day.activities.iter().find(|a| a.overlaps(activity)) {
        return Err(PlannerError::ScheduleConflict(Conflict {
            date: day.date,
            first: existing.activity.id,
            second: activity.activity.id,
            overlap_minutes: overlap_minutes(existing, activity),
        }));
    }
    if day.total_activity_minutes() + activity.activity.duration_minutes > max_daily_minutes {
        return Err(PlannerError::DailyBudgetExceeded {
            date: day.date,
            max_minutes: max_daily_minutes,
        });
    }
    Ok(())
}

fn insert_sorted(day: &mut DayPlan, activity: PlannedActivity) {
    let position = day
        .activities
        .partition_point(|a| a.start_time <= activity.start_time);
    day.activities.insert(position, activity);
}

fn overlap_minutes(a: &PlannedActivity, b: &PlannedActivity) -> i64 {
    let start = a.start_time.max(b.start_time);
    let end = a.end_time.min(b.end_time);
    (end - start).num_minutes()
}

fn repack(day: &mut DayPlan, day_start: NaiveTime) {
    day.activities.sort_by_key(|a| a.start_time);

    let mut cursor = day.date.and_time(day_start);
    for activity in &mut day.activities {
        activity.start_time = cursor;
        activity.end_time = cursor + Duration::minutes(activity.activity.duration_minutes as i64);
        cursor = activity.end_time;
    }

    debug_assert!(!ConflictChecker::day_has_conflicts(day));
}
