use serde::{Deserialize, Serialize};

use crate::models::search::Category;

/// Envelope of a nearby search response.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

/// Envelope of a place details response.
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    pub result: Option<PlaceDetails>,
    pub error_message: Option<String>,
}

/// A place as listed by nearby search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    pub vicinity: Option<String>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub business_status: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl PlaceSummary {
    pub fn is_closed(&self) -> bool {
        matches!(
            self.business_status.as_deref(),
            Some("CLOSED_PERMANENTLY") | Some("CLOSED_TEMPORARILY")
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

/// Full record from place details. Only the fields requested are returned,
/// so everything is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
    pub website: Option<String>,
    pub url: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub opening_hours: Option<OpeningHours>,
}

/// A search hit tagged with the category it was found under.
#[derive(Debug, Clone)]
pub struct CategorizedPlace {
    pub category: Category,
    pub place: PlaceSummary,
}
