use actix_web::{web, HttpResponse, Responder};
use mongodb::{bson::doc, Database};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::config::AppConfig;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(
    database: web::Data<Database>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_result = check_mongodb(&database).await;
    let places_result = check_places_api(&config);

    // Any failing dependency degrades the overall status
    if mongo_result.status != "ok" || places_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    health.services.insert("mongodb".to_string(), mongo_result);
    health.services.insert("places_api".to_string(), places_result);

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(database: &Database) -> ServiceStatus {
    match database.run_command(doc! {"ping": 1}).await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Connected successfully to MongoDB".to_string()),
        },
        Err(e) => {
            log::error!("MongoDB health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to connect: {}", e)),
            }
        }
    }
}

fn check_places_api(config: &AppConfig) -> ServiceStatus {
    if let Err(e) = url::Url::parse(&config.places_api_url) {
        return ServiceStatus {
            status: "error".to_string(),
            details: Some(format!(
                "PLACES_API_URL {:?} is not a valid URL: {}",
                config.places_api_url, e
            )),
        };
    }

    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "Places API key configured ({}), endpoint {}",
            mask_key(&config.places_api_key),
            config.places_api_url
        )),
    }
}

fn mask_key(key: &str) -> String {
    if key.len() > 8 && key.is_char_boundary(4) && key.is_char_boundary(key.len() - 4) {
        format!("{}***{}", &key[0..4], &key[key.len() - 4..])
    } else {
        "***".to_string()
    }
}
