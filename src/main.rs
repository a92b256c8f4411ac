use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use fun_search_api::{
    config::AppConfig, configure_routes, cors, db,
    services::places_service::GooglePlacesService,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let client = db::mongo::create_mongo_client(&config.mongodb_uri)
        .await
        .map_err(|e| {
            log::error!("Failed to create MongoDB client: {}", e);
            io::Error::other(e)
        })?;
    let database = client.database(&config.mongodb_database);

    let places = GooglePlacesService::from_config(&config).map_err(|e| {
        log::error!("Failed to create places client: {}", e);
        io::Error::other(e)
    })?;

    let bind = (config.host.clone(), config.port);
    log::info!("Starting HTTP server on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&config.cors_origin))
            .app_data(web::Data::new(database.clone()))
            .app_data(web::Data::new(places.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
