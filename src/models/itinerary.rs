use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::activity::{Cost, PlannedActivity};
use crate::models::preferences::TravelPreferences;
use crate::models::weather::WeatherForecast;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Destination {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Inclusive calendar date range.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Calendar days covered, both endpoints inclusive.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn iter_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |date| *date <= self.end)
    }
}

/// One calendar day of the trip: activities ordered by start time,
/// non-overlapping, with the day's forecast snapshot and free-form notes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub activities: Vec<PlannedActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherForecast>,
    pub notes: String,
}

impl DayPlan {
    pub fn total_activity_minutes(&self) -> u32 {
        self.activities
            .iter()
            .map(|a| a.activity.duration_minutes)
            .sum()
    }
}

/// The assembled trip. Created once by the generator; afterwards mutated
/// only through `ItineraryManager` operations, which keep the day invariants
/// intact. Storage and deletion belong to the persistence collaborator.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Itinerary {
    pub id: Uuid,
    pub title: String,
    pub destination: Destination,
    pub date_range: DateRange,
    pub preferences: TravelPreferences,
    pub days: Vec<DayPlan>,
    pub summary: String,
    pub total_cost: Cost,
}

impl Itinerary {
    pub fn total_activity_count(&self) -> usize {
        self.days.iter().map(|day| day.activities.len()).sum()
    }

    /// Re-derive the aggregate cost from the scheduled activities.
    /// Activities without a cost are ignored; the currency follows the first
    /// costed activity and falls back to USD on an all-free trip.
    pub fn recalculate_total_cost(&mut self) {
        let mut amount = 0.0f32;
        let mut currency: Option<String> = None;

        for activity in self.days.iter().flat_map(|day| day.activities.iter()) {
            if let Some(cost) = &activity.activity.cost {
                amount += cost.amount;
                if currency.is_none() {
                    currency = Some(cost.currency.clone());
                }
            }
        }

        self.total_cost = Cost {
            amount,
            currency: currency.unwrap_or_else(|| "USD".to_string()),
        };
    }
}
