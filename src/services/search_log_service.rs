use mongodb::{
    bson::{doc, DateTime},
    Collection, Database,
};

use crate::models::search::SearchLogEntry;

pub const SEARCH_LOG_COLLECTION: &str = "searchresults";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Append-only audit trail of searches, pruned by age.
pub struct SearchLogService {
    collection: Collection<SearchLogEntry>,
}

impl SearchLogService {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(SEARCH_LOG_COLLECTION),
        }
    }

    pub async fn record_search(&self, entry: &SearchLogEntry) -> mongodb::error::Result<()> {
        self.collection.insert_one(entry).await?;
        Ok(())
    }

    /// Delete entries created more than `retention_days` ago.
    pub async fn prune_search_log(&self, retention_days: i64) -> mongodb::error::Result<u64> {
        let cutoff = retention_cutoff(DateTime::now(), retention_days);
        let result = self
            .collection
            .delete_many(doc! { "createdAt": { "$lt": cutoff } })
            .await?;

        if result.deleted_count > 0 {
            log::info!("Pruned {} expired search log entries", result.deleted_count);
        }
        Ok(result.deleted_count)
    }
}

pub fn retention_cutoff(now: DateTime, retention_days: i64) -> DateTime {
    DateTime::from_millis(now.timestamp_millis() - retention_days.max(0) * MILLIS_PER_DAY)
}
