pub mod activity_filters;
pub mod conflict_service;
pub mod day_planner_service;
pub mod itinerary_generation_service;
pub mod itinerary_manager_service;
pub mod recommendation_service;
