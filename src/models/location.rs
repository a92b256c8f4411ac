use serde::{Deserialize, Serialize};

/// Key of the one document holding every searched location.
pub const LOCATION_SET_ID: &str = "locations";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LocationSet {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub locations: Vec<String>,
}
