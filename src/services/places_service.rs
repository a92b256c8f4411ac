//! Google Places API client
//!
//! Wraps the two legacy Places web service endpoints the itinerary needs:
//! - `nearbysearch/json`: venues of one `type` around a point, 20 per page,
//!   continued with an opaque `next_page_token`
//! - `details/json`: the per-place record carrying website, phone and the
//!   weekly `opening_hours.weekday_text`
//!
//! ## Setup
//! Set `GOOGLE_MAPS_API_KEY` with the Places API enabled. `PLACES_API_URL`
//! points the client elsewhere (used by the tests).

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{
    place::{NearbySearchResponse, PlaceDetails, PlaceDetailsResponse, PlaceSummary},
    search::Category,
};

const DETAIL_FIELDS: &str = "place_id,name,vicinity,formatted_address,website,url,\
formatted_phone_number,rating,user_ratings_total,price_level,opening_hours";

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error calling Places API: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse Places API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid Places API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Places API returned {status}{}", .message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status {
        status: String,
        message: Option<String>,
    },
}

/// One nearby search around a point for a single category.
#[derive(Debug, Clone)]
pub struct NearbyRequest {
    pub coordinates: (f64, f64),
    pub radius: u32,
    pub category: Category,
}

#[derive(Debug, Clone, Default)]
pub struct NearbyPage {
    pub results: Vec<PlaceSummary>,
    pub next_page_token: Option<String>,
}

/// Source of places data. The itinerary builder is generic over this so it
/// can run against a canned source in tests.
pub trait PlacesSource {
    /// Fetch one page. With a `page_token` the request parameters are
    /// ignored and the token alone selects the page.
    async fn nearby_search(
        &self,
        request: &NearbyRequest,
        page_token: Option<&str>,
    ) -> Result<NearbyPage, PlacesError>;

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}

#[derive(Clone)]
pub struct GooglePlacesService {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesService {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PlacesError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        Self::new(
            config.places_api_url.clone(),
            config.places_api_key.clone(),
            config.places_timeout,
        )
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, PlacesError> {
        let url = Url::parse_with_params(
            &format!("{}/{}", self.base_url, path),
            params
                .iter()
                .map(|(k, v)| (*k, v.as_str()))
                .chain(std::iter::once(("key", self.api_key.as_str()))),
        )?;
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, PlacesError> {
        let response = self.http_client.get(url).send().await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn check_status(status: &str, message: Option<String>) -> Result<(), PlacesError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(PlacesError::Status {
            status: other.to_string(),
            message,
        }),
    }
}

impl PlacesSource for GooglePlacesService {
    async fn nearby_search(
        &self,
        request: &NearbyRequest,
        page_token: Option<&str>,
    ) -> Result<NearbyPage, PlacesError> {
        let params = match page_token {
            Some(token) => vec![("pagetoken", token.to_string())],
            None => vec![
                (
                    "location",
                    format!("{},{}", request.coordinates.0, request.coordinates.1),
                ),
                ("radius", request.radius.to_string()),
                ("type", request.category.as_str().to_string()),
            ],
        };
        let url = self.endpoint("nearbysearch/json", &params)?;

        log::debug!(
            "Nearby search for {} (page token: {})",
            request.category.as_str(),
            page_token.is_some()
        );

        let response: NearbySearchResponse = self.get_json(url).await?;
        check_status(&response.status, response.error_message)?;

        Ok(NearbyPage {
            results: response.results,
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.endpoint(
            "details/json",
            &[
                ("place_id", place_id.to_string()),
                ("fields", DETAIL_FIELDS.to_string()),
            ],
        )?;

        let response: PlaceDetailsResponse = self.get_json(url).await?;
        check_status(&response.status, response.error_message)?;

        response.result.ok_or_else(|| PlacesError::Status {
            status: "NOT_FOUND".to_string(),
            message: Some(format!("No details returned for {}", place_id)),
        })
    }
}
