use serde::{Deserialize, Serialize};

/// Number of dimensions in a preference profile. Activity affinity vectors
/// carry the same dimensions, so similarity is always computed over arrays
/// of this length.
pub const PROFILE_DIMENSIONS: usize = 5;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Adventure,
    Relaxation,
    Culture,
    Food,
    Nature,
    Luxury,
    Budget,
}

impl TravelStyle {
    pub fn label(&self) -> &'static str {
        match self {
            TravelStyle::Adventure => "adventure",
            TravelStyle::Relaxation => "relaxation",
            TravelStyle::Culture => "culture",
            TravelStyle::Food => "food",
            TravelStyle::Nature => "nature",
            TravelStyle::Luxury => "luxury",
            TravelStyle::Budget => "budget",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    Moderate,
    Luxury,
}

impl BudgetTier {
    /// Highest activity price level admitted under this tier
    pub fn max_price_level(&self) -> u8 {
        match self {
            BudgetTier::Budget => 1,
            BudgetTier::Moderate => 2,
            BudgetTier::Luxury => 3,
        }
    }

    /// Price-sensitivity component contributed to the preference profile
    pub fn price_sensitivity(&self) -> f32 {
        match self {
            BudgetTier::Budget => 1.0,
            BudgetTier::Moderate => 0.5,
            BudgetTier::Luxury => 0.1,
        }
    }
}

impl Default for BudgetTier {
    fn default() -> Self {
        BudgetTier::Moderate
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripPace {
    Relaxed,
    Moderate,
    Intense,
}

impl TripPace {
    /// Get the maximum number of scheduled activities per day for this pace
    pub fn max_activities_per_day(&self) -> usize {
        match self {
            TripPace::Relaxed => 3,
            TripPace::Moderate => 4,
            TripPace::Intense => 6,
        }
    }

    /// Intensity component contributed to the preference profile
    pub fn intensity(&self) -> f32 {
        match self {
            TripPace::Relaxed => 0.2,
            TripPace::Moderate => 0.5,
            TripPace::Intense => 0.9,
        }
    }
}

impl Default for TripPace {
    fn default() -> Self {
        TripPace::Moderate
    }
}

/// Structured traveler input, validated by the surrounding service layer
/// before it reaches the engine. `travel_style` stays optional here so the
/// vectorizer can reject its absence explicitly instead of defaulting it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TravelPreferences {
    pub travel_style: Option<TravelStyle>,
    pub budget: BudgetTier,
    #[serde(default)]
    pub pace: TripPace,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Explicit per-dimension overrides in [0, 1]; they win over the
    /// style-derived values when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adventure: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relaxation: Option<f32>,
}

impl TravelPreferences {
    pub fn new(travel_style: TravelStyle, budget: BudgetTier, pace: TripPace) -> Self {
        Self {
            travel_style: Some(travel_style),
            budget,
            pace,
            interests: Vec::new(),
            adventure: None,
            culture: None,
            relaxation: None,
        }
    }
}

/// Fixed-dimension numeric encoding of a traveler's preferences.
///
/// Each component lies in [0, 1]. Built once per generation request and
/// never mutated afterwards; rebuilding the profile is the only way the
/// ranking can change.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PreferenceProfile {
    pub adventure: f32,
    pub culture: f32,
    pub relaxation: f32,
    pub price_sensitivity: f32,
    pub intensity: f32,
}

impl PreferenceProfile {
    /// All dimensions at the neutral midpoint.
    pub fn neutral() -> Self {
        Self {
            adventure: 0.5,
            culture: 0.5,
            relaxation: 0.5,
            price_sensitivity: 0.5,
            intensity: 0.5,
        }
    }

    pub fn as_array(&self) -> [f32; PROFILE_DIMENSIONS] {
        [
            self.adventure,
            self.culture,
            self.relaxation,
            self.price_sensitivity,
            self.intensity,
        ]
    }
}
