use chrono::{Duration, NaiveDate, NaiveTime};
use log::{debug, error};

use crate::models::activity::{PlannedActivity, ScoredActivity};
use crate::models::itinerary::DayPlan;
use crate::models::preferences::TripPace;
use crate::models::weather::WeatherForecast;
use crate::services::conflict_service::ConflictChecker;

const DAY_START_HOUR: u32 = 9;
const MAX_DAILY_MINUTES: u32 = 12 * 60;

#[derive(Debug, Clone)]
pub struct DayPlannerConfig {
    /// Anchor for the first activity of every day.
    pub day_start: NaiveTime,
    /// Ceiling on the summed activity durations of one day.
    pub max_daily_minutes: u32,
}

impl Default for DayPlannerConfig {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(DAY_START_HOUR, 0, 0).unwrap(),
            max_daily_minutes: MAX_DAILY_MINUTES,
        }
    }
}

impl DayPlannerConfig {
    /// Create a config from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let day_start = std::env::var("PLANNER_DAY_START_HOUR")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .and_then(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
            .unwrap_or(defaults.day_start);
        let max_daily_minutes = std::env::var("PLANNER_MAX_DAILY_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_daily_minutes);

        Self {
            day_start,
            max_daily_minutes,
        }
    }
}

#[derive(Default)]
pub struct DayPlanner {
    config: DayPlannerConfig,
}

impl DayPlanner {
    pub fn new() -> Self {
        Self {
            config: DayPlannerConfig::default(),
        }
    }

    pub fn with_config(config: DayPlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DayPlannerConfig {
        &self.config
    }

    /// Greedily fill one calendar day from a filtered, scored candidate pool.
    ///
    /// Candidates are visited in descending score order. One that would bust
    /// the remaining time budget is skipped, not a stopping point — a later,
    /// shorter activity may still fit. Admitted activities are packed
    /// back-to-back from the day-start anchor in selection order, so the
    /// result is chronological and non-overlapping by construction.
    ///
    /// An empty or infeasible pool yields a day with fewer (possibly zero)
    /// activities and an explanatory note; that is an expected outcome, not
    /// an error.
    pub fn plan_day(
        &self,
        date: NaiveDate,
        candidates: &[ScoredActivity],
        pace: TripPace,
        forecast: Option<&WeatherForecast>,
    ) -> DayPlan {
        let max_activities = pace.max_activities_per_day();
        let day_start = date.and_time(self.config.day_start);

        let mut activities: Vec<PlannedActivity> = Vec::new();
        let mut total_minutes: u32 = 0;

        for candidate in candidates {
            if activities.len() >= max_activities {
                // The count ceiling binds for the rest of the pool too.
                break;
            }
            let duration = candidate.activity.duration_minutes;
            if total_minutes + duration > self.config.max_daily_minutes {
                continue;
            }

            let start_time = day_start + Duration::minutes(total_minutes as i64);
            activities.push(PlannedActivity::from_scored(candidate.clone(), start_time));
            total_minutes += duration;
        }

        let notes = self.day_notes(&activities, max_activities, forecast, candidates.len());
        let plan = DayPlan {
            date,
            activities,
            weather: forecast.cloned(),
            notes,
        };

        // Packing cannot produce overlap, but activities can later be added
        // or moved outside this code path, so the invariant is re-checked
        // rather than assumed.
        if ConflictChecker::day_has_conflicts(&plan) {
            error!("day {} was packed with overlapping activities", plan.date);
        }

        debug!(
            "planned {} activities ({} min) for {}",
            plan.activities.len(),
            total_minutes,
            date
        );
        plan
    }

    fn day_notes(
        &self,
        activities: &[PlannedActivity],
        pace_target: usize,
        forecast: Option<&WeatherForecast>,
        pool_size: usize,
    ) -> String {
        let mut notes: Vec<String> = Vec::new();

        if let Some(forecast) = forecast {
            if forecast.condition.is_wet() {
                notes.push("Remember to bring an umbrella!".to_string());
            }
        }

        if activities.is_empty() {
            if pool_size == 0 {
                notes.push("No suitable activities were available for this day.".to_string());
            } else {
                notes.push("None of the available activities fit this day's schedule.".to_string());
            }
        } else {
            notes.push(format!("{} activities planned for today.", activities.len()));
            if activities.len() < pace_target {
                notes.push(format!(
                    "Fewer activities than the usual {} for this pace were available.",
                    pace_target
                ));
            }
        }

        notes.join(" ")
    }
}
