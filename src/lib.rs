use actix_cors::Cors;
use actix_web::web;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(routes::health::health_check))
        .route("/fun-search", web::get().to(routes::itinerary::fun_search))
        .route("/locations", web::get().to(routes::location::get_locations));
}

/// CORS for the front-end origin; `*` opens it to any origin.
pub fn cors(origin: &str) -> Cors {
    let cors = if origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(origin)
    };

    cors.allowed_methods(vec!["GET"])
        .allow_any_header()
        .max_age(3600)
}
