use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 3500;
const MONGODB_DATABASE: &str = "Locations";
const PLACES_API_URL: &str = "https://maps.googleapis.com/maps/api/place";
const PLACES_TIMEOUT_SECS: u64 = 10;
// Google never serves more than three pages (60 results) per nearby search.
const PLACES_MAX_PAGES: usize = 3;
const PAGE_TOKEN_DELAY_MS: u64 = 2000;
const SEARCH_LOG_RETENTION_DAYS: i64 = 365;
const MAX_TRIP_DAYS: u32 = 90;
const CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub places_api_key: String,
    pub places_api_url: String,
    pub places_timeout: Duration,
    pub places_max_pages: usize,
    pub page_token_delay: Duration,
    pub search_log_retention_days: i64,
    pub max_trip_days: u32,
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| HOST.to_string()),
            port: parse_var("PORT", PORT)?,
            mongodb_uri: required_var("MONGODB_URI")?,
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| MONGODB_DATABASE.to_string()),
            places_api_key: required_var("GOOGLE_MAPS_API_KEY")?,
            places_api_url: env::var("PLACES_API_URL")
                .unwrap_or_else(|_| PLACES_API_URL.to_string()),
            places_timeout: Duration::from_secs(parse_var(
                "PLACES_TIMEOUT_SECS",
                PLACES_TIMEOUT_SECS,
            )?),
            places_max_pages: parse_var("PLACES_MAX_PAGES", PLACES_MAX_PAGES)?,
            page_token_delay: Duration::from_millis(parse_var(
                "PAGE_TOKEN_DELAY_MS",
                PAGE_TOKEN_DELAY_MS,
            )?),
            search_log_retention_days: parse_var(
                "SEARCH_LOG_RETENTION_DAYS",
                SEARCH_LOG_RETENTION_DAYS,
            )?,
            max_trip_days: parse_var("MAX_TRIP_DAYS", MAX_TRIP_DAYS)?,
            cors_origin: env::var("CORS_ORIGIN").unwrap_or_else(|_| CORS_ORIGIN.to_string()),
        })
    }
}

fn required_var(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}
