use std::collections::HashSet;

use log::debug;
use uuid::Uuid;

use crate::error::PlannerError;
use crate::models::activity::{CandidateActivity, ScoredActivity};
use crate::models::preferences::{
    PreferenceProfile, TravelPreferences, TravelStyle, PROFILE_DIMENSIONS,
};

const INTEREST_BOOST: f32 = 0.2;

pub struct PreferenceVectorizer;

impl PreferenceVectorizer {
    /// Build the fixed-dimension profile for one generation request.
    ///
    /// Travel style drives the dominant scoring dimension, so a missing
    /// value is a validation error rather than a silent default. Every
    /// other unset signal lands on the neutral 0.5.
    pub fn vectorize(preferences: &TravelPreferences) -> Result<PreferenceProfile, PlannerError> {
        let style = preferences
            .travel_style
            .ok_or(PlannerError::MissingPreference("travel_style"))?;

        let mut profile = PreferenceProfile::neutral();
        match style {
            TravelStyle::Adventure => profile.adventure = 1.0,
            TravelStyle::Culture => profile.culture = 1.0,
            TravelStyle::Relaxation => profile.relaxation = 1.0,
            TravelStyle::Nature => profile.adventure = 0.9,
            TravelStyle::Food => profile.culture = 0.8,
            TravelStyle::Luxury => {
                profile.relaxation = 0.8;
                profile.price_sensitivity = 0.1;
            }
            TravelStyle::Budget => profile.price_sensitivity = 1.0,
        }

        // Luxury/budget styles already pin price sensitivity.
        if !matches!(style, TravelStyle::Luxury | TravelStyle::Budget) {
            profile.price_sensitivity = preferences.budget.price_sensitivity();
        }
        profile.intensity = preferences.pace.intensity();

        for interest in &preferences.interests {
            match interest.to_lowercase().as_str() {
                "outdoor" | "hiking" | "sports" | "adventure" | "wildlife" => {
                    profile.adventure = clamp01(profile.adventure + INTEREST_BOOST)
                }
                "museums" | "history" | "art" | "culture" | "food" => {
                    profile.culture = clamp01(profile.culture + INTEREST_BOOST)
                }
                "spa" | "beach" | "wellness" | "relaxation" => {
                    profile.relaxation = clamp01(profile.relaxation + INTEREST_BOOST)
                }
                _ => {}
            }
        }

        if let Some(value) = preferences.adventure {
            profile.adventure = clamp01(value);
        }
        if let Some(value) = preferences.culture {
            profile.culture = clamp01(value);
        }
        if let Some(value) = preferences.relaxation {
            profile.relaxation = clamp01(value);
        }

        Ok(profile)
    }
}

pub struct ActivityScorer;

impl ActivityScorer {
    /// Rank candidates by similarity to the profile, best first.
    ///
    /// The exclusion set prunes activities already placed elsewhere in the
    /// trip; it never alters scores. The sort is stable, so candidates with
    /// equal scores keep their input order and identical inputs always yield
    /// the identical ranking.
    pub fn score_and_rank(
        profile: &PreferenceProfile,
        candidates: &[CandidateActivity],
        exclusions: &HashSet<Uuid>,
    ) -> Vec<ScoredActivity> {
        let preference_vector = profile.as_array();

        let mut scored: Vec<ScoredActivity> = candidates
            .iter()
            .filter(|activity| !exclusions.contains(&activity.id))
            .map(|activity| ScoredActivity {
                score: cosine_similarity(&preference_vector, &activity.affinity.as_array()),
                activity: activity.clone(),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            "Scored {} of {} candidates ({} excluded)",
            scored.len(),
            candidates.len(),
            candidates.len() - scored.len()
        );
        scored
    }
}

/// Cosine similarity between two fixed-dimension vectors. A zero-magnitude
/// vector has no direction, so similarity is defined as 0 in that case.
fn cosine_similarity(a: &[f32; PROFILE_DIMENSIONS], b: &[f32; PROFILE_DIMENSIONS]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::{ActivityAffinity, ActivityCategory, ActivityLocation};
    use crate::models::preferences::{BudgetTier, TripPace};

    fn candidate(name: &str, affinity: ActivityAffinity) -> CandidateActivity {
        CandidateActivity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            location: ActivityLocation {
                name: "somewhere".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            },
            category: ActivityCategory::Activity,
            duration_minutes: 60,
            cost: None,
            price_level: None,
            outdoor: false,
            affinity,
        }
    }

    #[test]
    fn test_missing_travel_style_is_a_validation_error() {
        let preferences = TravelPreferences {
            travel_style: None,
            budget: BudgetTier::Moderate,
            pace: TripPace::Moderate,
            interests: Vec::new(),
            adventure: None,
            culture: None,
            relaxation: None,
        };

        let err = PreferenceVectorizer::vectorize(&preferences).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_PREFERENCE");
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_unset_dimensions_default_to_neutral() {
        let preferences =
            TravelPreferences::new(TravelStyle::Culture, BudgetTier::Moderate, TripPace::Moderate);
        let profile = PreferenceVectorizer::vectorize(&preferences).unwrap();

        assert_eq!(profile.culture, 1.0);
        assert_eq!(profile.adventure, 0.5);
        assert_eq!(profile.relaxation, 0.5);
        assert_eq!(profile.price_sensitivity, 0.5);
        assert_eq!(profile.intensity, 0.5);
    }

    #[test]
    fn test_interests_nudge_matching_dimensions() {
        let mut preferences =
            TravelPreferences::new(TravelStyle::Adventure, BudgetTier::Moderate, TripPace::Moderate);
        preferences.interests = vec!["hiking".to_string(), "museums".to_string()];

        let profile = PreferenceVectorizer::vectorize(&preferences).unwrap();
        // Already at the ceiling from the style; the boost clamps.
        assert_eq!(profile.adventure, 1.0);
        assert!((profile.culture - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_explicit_overrides_win() {
        let mut preferences =
            TravelPreferences::new(TravelStyle::Adventure, BudgetTier::Moderate, TripPace::Moderate);
        preferences.adventure = Some(0.3);

        let profile = PreferenceVectorizer::vectorize(&preferences).unwrap();
        assert!((profile.adventure - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_magnitude_vector_scores_zero() {
        let zero = ActivityAffinity {
            adventure_score: 0.0,
            cultural_score: 0.0,
            relaxation_score: 0.0,
            price_score: 0.0,
            intensity_score: 0.0,
        };
        let profile = PreferenceProfile::neutral();

        let scored =
            ActivityScorer::score_and_rank(&profile, &[candidate("void", zero)], &HashSet::new());
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].score, 0.0);
    }

    #[test]
    fn test_ranking_is_deterministic_and_ties_keep_input_order() {
        let strong = ActivityAffinity {
            adventure_score: 1.0,
            cultural_score: 0.1,
            relaxation_score: 0.1,
            price_score: 0.5,
            intensity_score: 0.8,
        };
        let tied = ActivityAffinity {
            adventure_score: 0.4,
            cultural_score: 0.4,
            relaxation_score: 0.4,
            price_score: 0.4,
            intensity_score: 0.4,
        };

        let candidates = vec![
            candidate("first-tied", tied),
            candidate("second-tied", tied),
            candidate("strong", strong),
        ];
        let mut profile = PreferenceProfile::neutral();
        profile.adventure = 1.0;

        let ranked = ActivityScorer::score_and_rank(&profile, &candidates, &HashSet::new());
        let again = ActivityScorer::score_and_rank(&profile, &candidates, &HashSet::new());

        assert_eq!(ranked[0].activity.name, "strong");
        // Tied candidates stay in input order.
        assert_eq!(ranked[1].activity.name, "first-tied");
        assert_eq!(ranked[2].activity.name, "second-tied");

        let ids: Vec<Uuid> = ranked.iter().map(|s| s.activity.id).collect();
        let ids_again: Vec<Uuid> = again.iter().map(|s| s.activity.id).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn test_exclusions_prune_without_changing_scores() {
        let affinity = ActivityAffinity {
            adventure_score: 0.9,
            cultural_score: 0.2,
            relaxation_score: 0.2,
            price_score: 0.5,
            intensity_score: 0.6,
        };
        let kept = candidate("kept", affinity);
        let dropped = candidate("dropped", affinity);
        let profile = PreferenceProfile::neutral();

        let unpruned =
            ActivityScorer::score_and_rank(&profile, &[kept.clone(), dropped.clone()], &HashSet::new());
        let exclusions: HashSet<Uuid> = [dropped.id].into_iter().collect();
        let pruned = ActivityScorer::score_and_rank(&profile, &[kept, dropped], &exclusions);

        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].activity.name, "kept");
        assert_eq!(pruned[0].score, unpruned[0].score);
    }
}
