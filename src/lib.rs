//! Itinerary assembly and day-scheduling engine.
//!
//! Given a destination, a date range and a traveler's preferences, the
//! engine ranks candidate activities against a preference profile, filters
//! them by weather and budget, greedily packs each day into non-overlapping
//! time blocks and aggregates the result into an itinerary with a total
//! cost and a readable summary. Candidate pools and weather forecasts are
//! inputs — fetching them is the surrounding service layer's job, and so
//! are persistence, auth and HTTP.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//!
//! use chrono::NaiveDate;
//! use itinerary_engine::models::itinerary::{DateRange, Destination};
//! use itinerary_engine::models::preferences::{
//!     BudgetTier, TravelPreferences, TravelStyle, TripPace,
//! };
//! use itinerary_engine::{GenerationRequest, ItineraryGenerator};
//!
//! fn main() -> Result<(), itinerary_engine::PlannerError> {
//!     let request = GenerationRequest {
//!         destination: Destination {
//!             name: "Lisbon".to_string(),
//!             country: Some("Portugal".to_string()),
//!             latitude: 38.72,
//!             longitude: -9.14,
//!         },
//!         date_range: DateRange {
//!             start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//!             end: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
//!         },
//!         preferences: TravelPreferences::new(
//!             TravelStyle::Culture,
//!             BudgetTier::Moderate,
//!             TripPace::Moderate,
//!         ),
//!     };
//!
//!     let generator = ItineraryGenerator::new();
//!     let itinerary = generator.generate(&request, &[], &HashMap::new())?;
//!     println!("{}", itinerary.summary);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod services;

pub use error::{PlannerError, Result};
pub use models::itinerary::{DayPlan, Itinerary};
pub use services::conflict_service::{Conflict, ConflictChecker};
pub use services::day_planner_service::{DayPlanner, DayPlannerConfig};
pub use services::itinerary_generation_service::{GenerationRequest, ItineraryGenerator};
pub use services::itinerary_manager_service::ItineraryManager;
