use actix_web::{web, HttpResponse, Responder};
use mongodb::Database;

use crate::services::location_service::LocationSetService;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    limit: Option<u16>,
    search: Option<String>,
}

/*
    /locations
*/
pub async fn get_locations(
    database: web::Data<Database>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let service = LocationSetService::new(&database);
    let limit = params.limit.map(usize::from);

    match service.list_locations(params.search.as_deref(), limit).await {
        Ok(locations) => HttpResponse::Ok().json(locations),
        Err(err) => {
            log::error!("Failed to load location set: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find locations.")
        }
    }
}
