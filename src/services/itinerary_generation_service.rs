use std::collections::HashSet;

use chrono::NaiveDate;
use log::info;
use rayon::prelude::*;
use uuid::Uuid;

use crate::error::PlannerError;
use crate::models::activity::{CandidateActivity, Cost, PlannedActivity};
use crate::models::itinerary::{DateRange, DayPlan, Destination, Itinerary};
use crate::models::preferences::{PreferenceProfile, TravelPreferences};
use crate::models::weather::ForecastMap;
use crate::services::activity_filters::{BudgetFilter, WeatherFilter};
use crate::services::day_planner_service::{DayPlanner, DayPlannerConfig};
use crate::services::recommendation_service::{ActivityScorer, PreferenceVectorizer};

const SUMMARY_HIGHLIGHTS: usize = 3;

/// Everything the engine needs to produce one itinerary. The candidate pool
/// and forecast map are passed separately because they come from different
/// collaborators and can be shared across requests.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub destination: Destination,
    pub date_range: DateRange,
    pub preferences: TravelPreferences,
}

/// Drives the day planner across every date of the trip and assembles the
/// result into an itinerary with a total cost and summary.
pub struct ItineraryGenerator {
    planner: DayPlanner,
}

impl ItineraryGenerator {
    pub fn new() -> Self {
        Self {
            planner: DayPlanner::new(),
        }
    }

    pub fn with_config(config: DayPlannerConfig) -> Self {
        Self {
            planner: DayPlanner::with_config(config),
        }
    }

    /// Generate a full itinerary from an already-fetched candidate pool and
    /// forecast map.
    ///
    /// Days are planned in date order. Activities placed on one day are
    /// excluded from the pool offered to later days, so the same activity
    /// never appears twice in the trip. Deterministic: identical inputs
    /// produce identical schedules.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        candidates: &[CandidateActivity],
        forecasts: &ForecastMap,
    ) -> Result<Itinerary, PlannerError> {
        let range = validated_range(request)?;
        let profile = PreferenceVectorizer::vectorize(&request.preferences)?;

        info!(
            "generating {}-day itinerary for {} from {} candidates",
            range.num_days(),
            request.destination.name,
            candidates.len()
        );

        let mut exclusions: HashSet<Uuid> = HashSet::new();
        let mut days = Vec::with_capacity(range.num_days() as usize);

        for date in range.iter_dates() {
            let day = self.plan_one_day(date, &profile, candidates, &exclusions, request, forecasts);
            exclusions.extend(day.activities.iter().map(|a| a.activity.id));
            days.push(day);
        }

        Ok(self.assemble(request, days))
    }

    /// Parallel variant of [`generate`](Self::generate).
    ///
    /// Per-day planning is independent, so days fan out across the rayon
    /// pool. Each day plans against an immutable snapshot of the initial
    /// exclusion state — sibling days cannot exclude each other's picks, so
    /// cross-day de-duplication is weaker than in the sequential path.
    /// Output days are sorted ascending by date regardless of completion
    /// order.
    pub fn generate_parallel(
        &self,
        request: &GenerationRequest,
        candidates: &[CandidateActivity],
        forecasts: &ForecastMap,
    ) -> Result<Itinerary, PlannerError> {
        let range = validated_range(request)?;
        let profile = PreferenceVectorizer::vectorize(&request.preferences)?;

        let exclusions: HashSet<Uuid> = HashSet::new();
        let dates: Vec<NaiveDate> = range.iter_dates().collect();

        let mut days: Vec<DayPlan> = dates
            .par_iter()
            .map(|date| {
                self.plan_one_day(*date, &profile, candidates, &exclusions, request, forecasts)
            })
            .collect();
        days.sort_by_key(|day| day.date);

        Ok(self.assemble(request, days))
    }

    fn plan_one_day(
        &self,
        date: NaiveDate,
        profile: &PreferenceProfile,
        candidates: &[CandidateActivity],
        exclusions: &HashSet<Uuid>,
        request: &GenerationRequest,
        forecasts: &ForecastMap,
    ) -> DayPlan {
        let forecast = forecasts.get(&date);

        let scored = ActivityScorer::score_and_rank(profile, candidates, exclusions);
        let scored = WeatherFilter::filter(scored, forecast);
        let scored = BudgetFilter::filter(scored, request.preferences.budget);

        self.planner
            .plan_day(date, &scored, request.preferences.pace, forecast)
    }

    fn assemble(&self, request: &GenerationRequest, days: Vec<DayPlan>) -> Itinerary {
        let summary = generate_summary(&days, &request.destination, &request.preferences);

        let mut itinerary = Itinerary {
            id: Uuid::new_v4(),
            title: format!("Trip to {}", request.destination.name),
            destination: request.destination.clone(),
            date_range: request.date_range,
            preferences: request.preferences.clone(),
            days,
            summary,
            total_cost: Cost {
                amount: 0.0,
                currency: "USD".to_string(),
            },
        };
        itinerary.recalculate_total_cost();
        itinerary
    }
}

impl Default for ItineraryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn validated_range(request: &GenerationRequest) -> Result<DateRange, PlannerError> {
    let range = request.date_range;
    if range.end < range.start {
        return Err(PlannerError::InvalidDateRange {
            start: range.start,
            end: range.end,
        });
    }
    // Inclusive endpoints: at least one day once they are ordered.
    debug_assert!(range.num_days() > 0);
    Ok(range)
}

/// Summary sentence naming the trip length, travel style, total activity
/// count and the highest-scored activities across the whole trip.
fn generate_summary(
    days: &[DayPlan],
    destination: &Destination,
    preferences: &TravelPreferences,
) -> String {
    let total_activities: usize = days.iter().map(|day| day.activities.len()).sum();
    let style = preferences
        .travel_style
        .map(|s| s.label())
        .unwrap_or("custom");

    let highlights = top_activities(days, SUMMARY_HIGHLIGHTS);
    let highlight_text = if highlights.is_empty() {
        "plenty of free time".to_string()
    } else {
        highlights.join(", ")
    };

    format!(
        "A {}-day {} trip to {} featuring {} activities. Highlights include {}.",
        days.len(),
        style,
        destination.name,
        total_activities,
        highlight_text
    )
}

/// Top-N activity names across the trip; ties keep scoring order.
fn top_activities(days: &[DayPlan], count: usize) -> Vec<String> {
    let mut all: Vec<&PlannedActivity> = days.iter().flat_map(|d| d.activities.iter()).collect();
    all.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    all.into_iter()
        .take(count)
        .map(|a| a.activity.name.clone())
        .collect()
}
