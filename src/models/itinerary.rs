use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    place::{PlaceDetails, PlaceSummary},
    search::Category,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub date: NaiveDate,
    pub events: Vec<ItineraryEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEvent {
    pub name: String,
    pub place_id: String,
    pub category: Category,
    pub address: Option<String>,
    pub website: Option<String>,
    pub maps_url: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    /// Opening hours for this day, `None` when the place publishes none.
    pub hours: Option<String>,
}

impl ItineraryEvent {
    /// Details win over the search listing; the listing fills the gaps.
    pub fn from_place(
        category: Category,
        summary: &PlaceSummary,
        details: &PlaceDetails,
        hours: Option<String>,
    ) -> Self {
        let name = if details.name.is_empty() {
            summary.name.clone()
        } else {
            details.name.clone()
        };

        ItineraryEvent {
            name,
            place_id: summary.place_id.clone(),
            category,
            address: details
                .vicinity
                .clone()
                .or_else(|| summary.vicinity.clone())
                .or_else(|| details.formatted_address.clone()),
            website: details.website.clone(),
            maps_url: details.url.clone(),
            phone: details.formatted_phone_number.clone(),
            rating: details.rating.or(summary.rating),
            user_ratings_total: details.user_ratings_total.or(summary.user_ratings_total),
            price_level: details.price_level.or(summary.price_level),
            hours,
        }
    }
}
