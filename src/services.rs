pub mod itinerary_service;
pub mod location_service;
pub mod open_hours;
pub mod places_service;
pub mod search_log_service;
