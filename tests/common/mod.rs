use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use std::time::Duration;

use fun_search_api::{
    config::AppConfig, configure_routes, services::places_service::GooglePlacesService,
};

// Nothing listens here, so every store call fails fast after server selection.
const UNREACHABLE_MONGODB_URI: &str =
    "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200";

pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub struct TestApp {
    pub database: Database,
    pub places: GooglePlacesService,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn new(places_api_url: &str) -> Self {
        Self::with_mongodb_uri(places_api_url, UNREACHABLE_MONGODB_URI).await
    }

    pub async fn with_mongodb_uri(places_api_url: &str, mongodb_uri: &str) -> Self {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .expect("Failed to build MongoDB client");

        let mut config = test_config(places_api_url);
        config.mongodb_uri = mongodb_uri.to_string();
        let places = GooglePlacesService::from_config(&config).expect("Failed to build places client");

        Self {
            database: client.database(&config.mongodb_database),
            places,
            config,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.database.clone()))
            .app_data(web::Data::new(self.places.clone()))
            .app_data(web::Data::new(self.config.clone()))
            .configure(configure_routes)
    }
}

/// Database on the server named by `MONGODB_URI` (default localhost), or
/// `None` when no server answers.
pub async fn live_database(name: &str) -> Option<Database> {
    let mongo_uri =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mut options = ClientOptions::parse(&mongo_uri).await.ok()?;
    options.server_selection_timeout = Some(Duration::from_secs(2));
    options.connect_timeout = Some(Duration::from_secs(2));
    let client = Client::with_options(options).ok()?;

    let database = client.database(name);
    match database.run_command(doc! {"ping": 1}).await {
        Ok(_) => Some(database),
        Err(e) => {
            eprintln!("Skipping store test, MongoDB unavailable at {}: {}", mongo_uri, e);
            None
        }
    }
}

pub fn test_config(places_api_url: &str) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        mongodb_uri: UNREACHABLE_MONGODB_URI.to_string(),
        mongodb_database: "FunSearchTest".to_string(),
        places_api_key: "test-places-key".to_string(),
        places_api_url: places_api_url.to_string(),
        places_timeout: Duration::from_secs(5),
        places_max_pages: 3,
        page_token_delay: Duration::ZERO,
        search_log_retention_days: 365,
        max_trip_days: 30,
        cors_origin: TEST_ORIGIN.to_string(),
    }
}

pub fn search_uri(extra: &str) -> String {
    format!(
        "/fun-search?startDate=2024-03-03&endDate=2024-03-04&location=Denver%2C%20CO\
&lat=39.7392&lng=-104.9903&radius=5000{}",
        extra
    )
}
