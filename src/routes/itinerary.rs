use actix_web::{web, HttpResponse};
use mongodb::Database;

use crate::{
    config::AppConfig,
    error::ApiError,
    models::search::{ItineraryRequest, SearchLogEntry, SearchQuery},
    services::{
        itinerary_service::{build_itinerary, ItinerarySettings},
        location_service::LocationSetService,
        places_service::GooglePlacesService,
        search_log_service::SearchLogService,
    },
};

/*
    /fun-search
*/
pub async fn fun_search(
    database: web::Data<Database>,
    places: web::Data<GooglePlacesService>,
    config: web::Data<AppConfig>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let request = ItineraryRequest::from_query(&query, config.max_trip_days)?;

    log::info!(
        "Search for {:?} from {} to {} ({} categories)",
        query.location,
        request.start_date,
        request.end_date,
        request.categories.len()
    );

    record_search(&database, &config, &request, &query.location);

    let settings = ItinerarySettings::from_config(&config);
    let days = build_itinerary(places.get_ref(), &request, &settings).await?;

    Ok(HttpResponse::Ok().json(days))
}

/// Bookkeeping around a search, run in the background so the itinerary
/// never waits on the store. Failures are logged and swallowed.
fn record_search(
    database: &Database,
    config: &AppConfig,
    request: &ItineraryRequest,
    location: &str,
) {
    let search_log = SearchLogService::new(database);
    let locations = LocationSetService::new(database);
    let entry = SearchLogEntry::new(request, location);
    let location = location.to_string();
    let retention_days = config.search_log_retention_days;

    actix_web::rt::spawn(async move {
        let (recorded, pruned, remembered) = futures::join!(
            search_log.record_search(&entry),
            search_log.prune_search_log(retention_days),
            locations.remember_location(&location),
        );

        if let Err(e) = recorded {
            log::warn!("Failed to save search to MongoDB: {}", e);
        }
        if let Err(e) = pruned {
            log::warn!("Failed to prune search log: {}", e);
        }
        if let Err(e) = remembered {
            log::warn!("Failed to update location set: {}", e);
        }
    });
}
