use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::try_join_all;

use crate::config::AppConfig;
use crate::models::{
    itinerary::{ItineraryDay, ItineraryEvent},
    place::{CategorizedPlace, PlaceDetails, PlaceSummary},
    search::{ItineraryRequest, PlaceFilter},
};
use crate::services::open_hours::{date_range, hours_for, weekday_index, DayHours};
use crate::services::places_service::{NearbyRequest, PlacesError, PlacesSource};

#[derive(Debug, Clone)]
pub struct ItinerarySettings {
    /// Wait before asking for a follow-up page; fresh tokens are rejected
    /// with `INVALID_REQUEST` for a short while after issue.
    pub page_token_delay: Duration,
    pub max_pages: usize,
}

impl ItinerarySettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            page_token_delay: config.page_token_delay,
            max_pages: config.places_max_pages,
        }
    }
}

/// A place that survived filtering, joined with its details.
#[derive(Debug, Clone)]
pub struct EnrichedPlace {
    pub place: CategorizedPlace,
    pub details: PlaceDetails,
}

/// Read every page of one category search.
pub async fn collect_category<P: PlacesSource>(
    source: &P,
    request: &NearbyRequest,
    settings: &ItinerarySettings,
) -> Result<Vec<PlaceSummary>, PlacesError> {
    let mut places = Vec::new();
    let mut page_token: Option<String> = None;

    for page_number in 0..settings.max_pages.max(1) {
        if page_number > 0 && !settings.page_token_delay.is_zero() {
            tokio::time::sleep(settings.page_token_delay).await;
        }

        let page = source
            .nearby_search(request, page_token.as_deref())
            .await?;
        places.extend(page.results);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(places)
}

/// Apply the rating thresholds, drop closed businesses, and keep the first
/// occurrence of each place id.
pub fn filter_places(candidates: Vec<CategorizedPlace>, filter: &PlaceFilter) -> Vec<CategorizedPlace> {
    let mut seen = HashSet::new();

    candidates
        .into_iter()
        .filter(|candidate| {
            let place = &candidate.place;
            place.rating.unwrap_or(0.0) >= filter.minimum_rating
                && place.user_ratings_total.unwrap_or(0) >= filter.minimum_ratings
                && !place.is_closed()
        })
        .filter(|candidate| seen.insert(candidate.place.place_id.clone()))
        .collect()
}

/// Fetch details for every place concurrently. Any failure fails the batch.
pub async fn fetch_details<P: PlacesSource>(
    source: &P,
    places: Vec<CategorizedPlace>,
) -> Result<Vec<EnrichedPlace>, PlacesError> {
    let details = try_join_all(
        places
            .iter()
            .map(|candidate| source.place_details(&candidate.place.place_id)),
    )
    .await?;

    Ok(places
        .into_iter()
        .zip(details)
        .map(|(place, details)| EnrichedPlace { place, details })
        .collect())
}

fn rating_of(place: &EnrichedPlace) -> f32 {
    place
        .details
        .rating
        .or(place.place.place.rating)
        .unwrap_or(0.0)
}

/// Lay places out over the trip: each day lists the places not closed on
/// that weekday, best rated first.
pub fn schedule(start: NaiveDate, end: NaiveDate, mut places: Vec<EnrichedPlace>) -> Vec<ItineraryDay> {
    places.sort_by(|a, b| rating_of(b).total_cmp(&rating_of(a)));

    date_range(start, end)
        .into_iter()
        .enumerate()
        .map(|(offset, date)| {
            let index = weekday_index(start, offset);
            let events = places
                .iter()
                .filter_map(|enriched| {
                    let hours = match hours_for(enriched.details.opening_hours.as_ref(), index) {
                        DayHours::Closed => return None,
                        DayHours::Open(hours) => Some(hours),
                        DayHours::Unknown => None,
                    };
                    Some(ItineraryEvent::from_place(
                        enriched.place.category,
                        &enriched.place.place,
                        &enriched.details,
                        hours,
                    ))
                })
                .collect();

            ItineraryDay { date, events }
        })
        .collect()
}

pub async fn build_itinerary<P: PlacesSource>(
    source: &P,
    request: &ItineraryRequest,
    settings: &ItinerarySettings,
) -> Result<Vec<ItineraryDay>, PlacesError> {
    let mut candidates = Vec::new();

    for category in &request.categories {
        let nearby = NearbyRequest {
            coordinates: request.coordinates,
            radius: request.radius,
            category: *category,
        };
        let places = collect_category(source, &nearby, settings).await?;
        log::info!("Found {} places for {}", places.len(), category.as_str());

        candidates.extend(places.into_iter().map(|place| CategorizedPlace {
            category: *category,
            place,
        }));
    }

    let total = candidates.len();
    let kept = filter_places(candidates, &request.filter);
    log::info!("Kept {} of {} places after filtering", kept.len(), total);

    let enriched = fetch_details(source, kept).await?;

    Ok(schedule(request.start_date, request.end_date, enriched))
}
