use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rain,
    Storm,
}

impl WeatherCondition {
    /// Conditions that push outdoor activities off the schedule.
    pub fn is_wet(&self) -> bool {
        matches!(self, WeatherCondition::Rain | WeatherCondition::Storm)
    }
}

/// One day's forecast snapshot. Read-only input to day planning.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherForecast {
    pub temperature: f32,
    pub condition: WeatherCondition,
    /// Precipitation probability in [0, 1].
    pub precipitation: f32,
}

/// Forecasts keyed by calendar date, as handed over by the weather
/// collaborator. May be partial; a missing date means the forecast is
/// unknown and no weather filtering applies for that day.
pub type ForecastMap = HashMap<NaiveDate, WeatherForecast>;
