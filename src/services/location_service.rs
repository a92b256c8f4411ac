use mongodb::{bson::doc, Collection, Database};

use crate::models::location::{LocationSet, LOCATION_SET_ID};

pub const LOCATION_SET_COLLECTION: &str = "locations";

/// The set of every location users have searched for, kept in one document.
pub struct LocationSetService {
    collection: Collection<LocationSet>,
}

impl LocationSetService {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(LOCATION_SET_COLLECTION),
        }
    }

    /// Add a location to the set. Blank input is ignored and reports `false`.
    pub async fn remember_location(&self, location: &str) -> mongodb::error::Result<bool> {
        let location = location.trim();
        if location.is_empty() {
            return Ok(false);
        }

        self.collection
            .update_one(
                doc! { "_id": LOCATION_SET_ID },
                doc! { "$addToSet": { "locations": location } },
            )
            .upsert(true)
            .await?;
        Ok(true)
    }

    pub async fn list_locations(
        &self,
        search: Option<&str>,
        limit: Option<usize>,
    ) -> mongodb::error::Result<Vec<String>> {
        let locations = self
            .collection
            .find_one(doc! { "_id": LOCATION_SET_ID })
            .await?
            .map(|set| set.locations)
            .unwrap_or_default();

        Ok(select_locations(locations, search, limit))
    }
}

/// Sort, apply a case-insensitive prefix filter, then cap the count.
pub fn select_locations(
    mut locations: Vec<String>,
    search: Option<&str>,
    limit: Option<usize>,
) -> Vec<String> {
    locations.sort_by_key(|l| l.to_lowercase());
    locations.dedup();

    if let Some(prefix) = search.map(str::trim).filter(|s| !s.is_empty()) {
        let prefix = prefix.to_lowercase();
        locations.retain(|l| l.to_lowercase().starts_with(&prefix));
    }
    if let Some(limit) = limit {
        locations.truncate(limit);
    }
    locations
}
