use bson::{oid::ObjectId, DateTime};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// Places API hard limit for nearby search radius, in metres.
const MAX_RADIUS_METERS: f64 = 50_000.0;

/// Venue categories a user can toggle. Each maps onto a places `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AmusementPark,
    Aquarium,
    ArtGallery,
    Bar,
    BowlingAlley,
    Cafe,
    Casino,
    MovieTheater,
    Museum,
    NightClub,
    Park,
    Restaurant,
    ShoppingMall,
    Spa,
    Stadium,
    TouristAttraction,
    Zoo,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AmusementPark => "amusement_park",
            Category::Aquarium => "aquarium",
            Category::ArtGallery => "art_gallery",
            Category::Bar => "bar",
            Category::BowlingAlley => "bowling_alley",
            Category::Cafe => "cafe",
            Category::Casino => "casino",
            Category::MovieTheater => "movie_theater",
            Category::Museum => "museum",
            Category::NightClub => "night_club",
            Category::Park => "park",
            Category::Restaurant => "restaurant",
            Category::ShoppingMall => "shopping_mall",
            Category::Spa => "spa",
            Category::Stadium => "stadium",
            Category::TouristAttraction => "tourist_attraction",
            Category::Zoo => "zoo",
        }
    }
}

/// Raw query string of `GET /fun-search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    #[serde(default)]
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
    #[serde(default)]
    pub amusement_park: bool,
    #[serde(default)]
    pub aquarium: bool,
    #[serde(default)]
    pub art_gallery: bool,
    #[serde(default)]
    pub bar: bool,
    #[serde(default)]
    pub bowling_alley: bool,
    #[serde(default)]
    pub cafe: bool,
    #[serde(default)]
    pub casino: bool,
    #[serde(default)]
    pub movie_theater: bool,
    #[serde(default)]
    pub museum: bool,
    #[serde(default)]
    pub night_club: bool,
    #[serde(default)]
    pub park: bool,
    #[serde(default)]
    pub restaurant: bool,
    #[serde(default)]
    pub shopping_mall: bool,
    #[serde(default)]
    pub spa: bool,
    #[serde(default)]
    pub stadium: bool,
    #[serde(default)]
    pub tourist_attraction: bool,
    #[serde(default)]
    pub zoo: bool,
    #[serde(default)]
    pub minimum_rating: f32,
    #[serde(default)]
    pub minimum_ratings: u32,
}

impl SearchQuery {
    /// Selected categories, in a fixed order. Deduplication keeps the first
    /// category a place was found under, so this order is observable.
    pub fn categories(&self) -> Vec<Category> {
        [
            (self.amusement_park, Category::AmusementPark),
            (self.aquarium, Category::Aquarium),
            (self.art_gallery, Category::ArtGallery),
            (self.bar, Category::Bar),
            (self.bowling_alley, Category::BowlingAlley),
            (self.cafe, Category::Cafe),
            (self.casino, Category::Casino),
            (self.movie_theater, Category::MovieTheater),
            (self.museum, Category::Museum),
            (self.night_club, Category::NightClub),
            (self.park, Category::Park),
            (self.restaurant, Category::Restaurant),
            (self.shopping_mall, Category::ShoppingMall),
            (self.spa, Category::Spa),
            (self.stadium, Category::Stadium),
            (self.tourist_attraction, Category::TouristAttraction),
            (self.zoo, Category::Zoo),
        ]
        .into_iter()
        .filter_map(|(selected, category)| selected.then_some(category))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceFilter {
    pub minimum_rating: f32,
    pub minimum_ratings: u32,
}

/// A validated search, ready to run against the places API.
#[derive(Debug, Clone)]
pub struct ItineraryRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub coordinates: (f64, f64),
    pub radius: u32,
    pub categories: Vec<Category>,
    pub filter: PlaceFilter,
}

impl ItineraryRequest {
    /// Validate a raw query. Trips longer than `max_trip_days` are refused so
    /// the day-by-day response stays bounded.
    pub fn from_query(query: &SearchQuery, max_trip_days: u32) -> Result<Self, ApiError> {
        let start_date = parse_date("startDate", &query.start_date)?;
        let end_date = parse_date("endDate", &query.end_date)?;
        if start_date > end_date {
            return Err(ApiError::InvalidQuery(format!(
                "startDate {} is after endDate {}",
                start_date, end_date
            )));
        }

        let trip_days = (end_date - start_date).num_days() + 1;
        if trip_days > i64::from(max_trip_days) {
            return Err(ApiError::InvalidQuery(format!(
                "Trip of {} days exceeds the maximum of {} days",
                trip_days, max_trip_days
            )));
        }

        if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lng) {
            return Err(ApiError::InvalidQuery(format!(
                "Coordinates out of range: {},{}",
                query.lat, query.lng
            )));
        }

        if !(query.radius > 0.0 && query.radius <= MAX_RADIUS_METERS) {
            return Err(ApiError::InvalidQuery(format!(
                "radius must be between 0 and {} metres",
                MAX_RADIUS_METERS
            )));
        }

        Ok(Self {
            start_date,
            end_date,
            coordinates: (query.lat, query.lng),
            radius: query.radius.round().max(1.0) as u32,
            categories: query.categories(),
            filter: PlaceFilter {
                minimum_rating: query.minimum_rating,
                minimum_ratings: query.minimum_ratings,
            },
        })
    }
}

/// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp, which is
/// what browsers send from `Date.toISOString()`.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|e| ApiError::InvalidQuery(format!("Failed to parse {}: {}", field, e)))
}

/// Audit record written for every search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchLogEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "startDate")]
    pub start_date: DateTime,
    #[serde(rename = "endDate")]
    pub end_date: DateTime,
    pub location: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

impl SearchLogEntry {
    pub fn new(request: &ItineraryRequest, location: &str) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            start_date: midnight(request.start_date),
            end_date: midnight(request.end_date),
            location: location.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

fn midnight(date: NaiveDate) -> DateTime {
    DateTime::from_millis(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}
