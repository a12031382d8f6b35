use crate::models::activity::{CandidateActivity, ScoredActivity};
use crate::models::preferences::BudgetTier;
use crate::models::weather::WeatherForecast;

/// Drops outdoor-dependent activities on rain or storm days.
pub struct WeatherFilter;

impl WeatherFilter {
    /// An unknown forecast filters nothing.
    pub fn allows(activity: &CandidateActivity, forecast: Option<&WeatherForecast>) -> bool {
        match forecast {
            Some(forecast) => {
                !(activity.outdoor
                    && activity.category.is_weather_sensitive()
                    && forecast.condition.is_wet())
            }
            None => true,
        }
    }

    pub fn filter(
        scored: Vec<ScoredActivity>,
        forecast: Option<&WeatherForecast>,
    ) -> Vec<ScoredActivity> {
        scored
            .into_iter()
            .filter(|s| Self::allows(&s.activity, forecast))
            .collect()
    }
}

/// Drops activities priced above the traveler's budget tier.
pub struct BudgetFilter;

impl BudgetFilter {
    /// Activities without a price level are treated as the cheapest tier so
    /// low-data candidates are never starved out.
    pub fn allows(price_level: Option<u8>, tier: BudgetTier) -> bool {
        price_level.unwrap_or(1) <= tier.max_price_level()
    }

    pub fn filter(scored: Vec<ScoredActivity>, tier: BudgetTier) -> Vec<ScoredActivity> {
        scored
            .into_iter()
            .filter(|s| Self::allows(s.activity.price_level, tier))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::{ActivityAffinity, ActivityCategory, ActivityLocation};
    use crate::models::weather::WeatherCondition;
    use uuid::Uuid;

    fn scored(category: ActivityCategory, outdoor: bool, price_level: Option<u8>) -> ScoredActivity {
        ScoredActivity {
            activity: CandidateActivity {
                id: Uuid::new_v4(),
                name: "test".to_string(),
                description: String::new(),
                location: ActivityLocation {
                    name: "somewhere".to_string(),
                    latitude: 0.0,
                    longitude: 0.0,
                },
                category,
                duration_minutes: 60,
                cost: None,
                price_level,
                outdoor,
                affinity: ActivityAffinity {
                    adventure_score: 0.5,
                    cultural_score: 0.5,
                    relaxation_score: 0.5,
                    price_score: 0.5,
                    intensity_score: 0.5,
                },
            },
            score: 0.5,
        }
    }

    fn forecast(condition: WeatherCondition) -> WeatherForecast {
        WeatherForecast {
            temperature: 15.0,
            condition,
            precipitation: 0.8,
        }
    }

    #[test]
    fn test_rain_drops_outdoor_dependent_categories_only() {
        let rain = forecast(WeatherCondition::Rain);
        let pool = vec![
            scored(ActivityCategory::Activity, true, None),
            scored(ActivityCategory::Sightseeing, true, None),
            scored(ActivityCategory::Sightseeing, false, None),
            scored(ActivityCategory::Food, true, None),
            scored(ActivityCategory::Transport, true, None),
        ];

        let kept = WeatherFilter::filter(pool, Some(&rain));
        assert_eq!(kept.len(), 3);
        assert!(kept
            .iter()
            .all(|s| !s.activity.outdoor || !s.activity.category.is_weather_sensitive()));
    }

    #[test]
    fn test_storm_filters_like_rain() {
        let storm = forecast(WeatherCondition::Storm);
        assert!(!WeatherFilter::allows(
            &scored(ActivityCategory::Activity, true, None).activity,
            Some(&storm)
        ));
    }

    #[test]
    fn test_unknown_forecast_filters_nothing() {
        let pool = vec![
            scored(ActivityCategory::Activity, true, None),
            scored(ActivityCategory::Sightseeing, true, None),
        ];
        assert_eq!(WeatherFilter::filter(pool, None).len(), 2);
    }

    #[test]
    fn test_weather_filter_is_idempotent() {
        let rain = forecast(WeatherCondition::Rain);
        let pool = vec![
            scored(ActivityCategory::Activity, true, None),
            scored(ActivityCategory::Food, false, None),
            scored(ActivityCategory::Sightseeing, true, None),
        ];

        let once = WeatherFilter::filter(pool, Some(&rain));
        let once_ids: Vec<Uuid> = once.iter().map(|s| s.activity.id).collect();
        let twice = WeatherFilter::filter(once, Some(&rain));
        let twice_ids: Vec<Uuid> = twice.iter().map(|s| s.activity.id).collect();

        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn test_budget_tier_ceilings() {
        assert!(BudgetFilter::allows(Some(1), BudgetTier::Budget));
        assert!(!BudgetFilter::allows(Some(2), BudgetTier::Budget));
        assert!(BudgetFilter::allows(Some(2), BudgetTier::Moderate));
        assert!(!BudgetFilter::allows(Some(3), BudgetTier::Moderate));
        assert!(BudgetFilter::allows(Some(3), BudgetTier::Luxury));
    }

    #[test]
    fn test_unpriced_activities_always_pass() {
        assert!(BudgetFilter::allows(None, BudgetTier::Budget));
        let pool = vec![scored(ActivityCategory::Food, false, None)];
        assert_eq!(BudgetFilter::filter(pool, BudgetTier::Budget).len(), 1);
    }
}
