use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::preferences::PROFILE_DIMENSIONS;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Sightseeing,
    Food,
    Activity,
    Accommodation,
    Transport,
}

impl ActivityCategory {
    /// Categories whose outdoor variants wash out in bad weather. Food,
    /// lodging and transport run regardless of the forecast.
    pub fn is_weather_sensitive(&self) -> bool {
        matches!(self, ActivityCategory::Sightseeing | ActivityCategory::Activity)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActivityLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Cost {
    pub amount: f32,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

// Custom deserializer to handle floating point price levels from place providers
fn deserialize_optional_rounded_u8<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_json::Value::Number(n)) => {
            if let Some(f) = n.as_f64() {
                Ok(Some(f.ceil() as u8))
            } else if let Some(i) = n.as_u64() {
                Ok(Some(i as u8))
            } else {
                Ok(None)
            }
        }
        Some(serde_json::Value::Null) => Ok(None),
        _ => Ok(None),
    }
}

/// Per-dimension affinity of an activity, matching the dimensions of a
/// preference profile component for component.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ActivityAffinity {
    pub adventure_score: f32,
    pub cultural_score: f32,
    pub relaxation_score: f32,
    pub price_score: f32,
    pub intensity_score: f32,
}

impl ActivityAffinity {
    pub fn as_array(&self) -> [f32; PROFILE_DIMENSIONS] {
        [
            self.adventure_score,
            self.cultural_score,
            self.relaxation_score,
            self.price_score,
            self.intensity_score,
        ]
    }
}

/// An unscored, unscheduled potential itinerary item pulled from an external
/// place source. Immutable once fetched.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CandidateActivity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: ActivityLocation,
    pub category: ActivityCategory,
    /// Always positive; a zero-duration activity cannot be scheduled.
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
    /// Ordinal price tier (1..=3). Absent for low-data candidates, which
    /// the budget filter treats as the cheapest tier.
    #[serde(deserialize_with = "deserialize_optional_rounded_u8", default)]
    pub price_level: Option<u8>,
    /// Whether the activity takes place outdoors; drives weather filtering.
    #[serde(default)]
    pub outdoor: bool,
    pub affinity: ActivityAffinity,
}

/// A candidate plus its similarity score against the preference profile,
/// in [-1, 1]. Recomputed whenever the profile or candidate pool changes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoredActivity {
    pub activity: CandidateActivity,
    pub score: f32,
}

/// A scored activity pinned to a concrete block on a day's timeline.
/// Intervals are closed-open `[start, end)` with `end = start + duration`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlannedActivity {
    pub activity: CandidateActivity,
    pub score: f32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl PlannedActivity {
    pub fn from_scored(scored: ScoredActivity, start_time: NaiveDateTime) -> Self {
        let end_time = start_time + Duration::minutes(scored.activity.duration_minutes as i64);
        Self {
            activity: scored.activity,
            score: scored.score,
            start_time,
            end_time,
        }
    }

    pub fn overlaps(&self, other: &PlannedActivity) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_level_accepts_fractional_numbers() {
        let json = r#"{
            "id": "6e9bd96f-2eb8-4a34-a6fa-0cf1a6b8c2f1",
            "name": "Harbor cruise",
            "description": "Sunset loop around the bay",
            "location": { "name": "Old Harbor", "latitude": 38.7, "longitude": -9.1 },
            "category": "activity",
            "duration_minutes": 90,
            "price_level": 1.4,
            "outdoor": true,
            "affinity": {
                "adventure_score": 0.6,
                "cultural_score": 0.2,
                "relaxation_score": 0.7,
                "price_score": 0.4,
                "intensity_score": 0.3
            }
        }"#;

        let activity: CandidateActivity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.price_level, Some(2));
        assert!(activity.cost.is_none());
    }

    #[test]
    fn test_planned_activity_interval_is_closed_open() {
        let activity: CandidateActivity = serde_json::from_str(
            r#"{
            "id": "3b84ea6f-97b9-41ad-8e3f-55b67b12acd9",
            "name": "Walking tour",
            "description": "Guided old-town walk",
            "location": { "name": "Main square", "latitude": 0.0, "longitude": 0.0 },
            "category": "sightseeing",
            "duration_minutes": 60,
            "affinity": {
                "adventure_score": 0.2,
                "cultural_score": 0.9,
                "relaxation_score": 0.3,
                "price_score": 0.2,
                "intensity_score": 0.4
            }
        }"#,
        )
        .unwrap();

        let start = chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let first = PlannedActivity::from_scored(
            ScoredActivity { activity: activity.clone(), score: 0.5 },
            start,
        );
        // Back-to-back neighbor sharing the boundary instant does not overlap.
        let second = PlannedActivity::from_scored(
            ScoredActivity { activity, score: 0.5 },
            first.end_time,
        );

        assert!(first.end_time > first.start_time);
        assert!(!first.overlaps(&second));
    }
}
