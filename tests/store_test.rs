mod common;

use mongodb::bson::{doc, DateTime};
use serial_test::serial;

use common::live_database;
use fun_search_api::{
    models::{location::LocationSet, search::SearchLogEntry},
    services::{
        location_service::{LocationSetService, LOCATION_SET_COLLECTION},
        search_log_service::{SearchLogService, SEARCH_LOG_COLLECTION},
    },
};

const STORE_TEST_DATABASE: &str = "FunSearchStoreTest";
const MILLIS_PER_DAY: i64 = 86_400_000;

fn log_entry(location: &str, days_ago: i64) -> SearchLogEntry {
    let created =
        DateTime::from_millis(DateTime::now().timestamp_millis() - days_ago * MILLIS_PER_DAY);
    SearchLogEntry {
        id: None,
        start_date: created,
        end_date: created,
        location: location.to_string(),
        created_at: created,
        updated_at: created,
    }
}

#[actix_rt::test]
#[serial]
async fn test_location_set_keeps_each_location_once() {
    let Some(database) = live_database(STORE_TEST_DATABASE).await else {
        return;
    };
    database
        .collection::<LocationSet>(LOCATION_SET_COLLECTION)
        .drop()
        .await
        .unwrap();

    let service = LocationSetService::new(&database);
    assert!(service.remember_location("Denver, CO").await.unwrap());
    assert!(service.remember_location("  Denver, CO ").await.unwrap());
    assert!(service.remember_location("Boulder, CO").await.unwrap());
    assert!(!service.remember_location("  ").await.unwrap());

    let stored = database
        .collection::<LocationSet>(LOCATION_SET_COLLECTION)
        .find_one(doc! {})
        .await
        .unwrap()
        .expect("location set should be upserted");
    assert_eq!(stored.id, "locations");
    assert_eq!(stored.locations, vec!["Denver, CO", "Boulder, CO"]);

    let listed = service.list_locations(Some("den"), Some(5)).await.unwrap();
    assert_eq!(listed, vec!["Denver, CO"]);
}

#[actix_rt::test]
#[serial]
async fn test_list_locations_before_any_search_is_empty() {
    let Some(database) = live_database(STORE_TEST_DATABASE).await else {
        return;
    };
    database
        .collection::<LocationSet>(LOCATION_SET_COLLECTION)
        .drop()
        .await
        .unwrap();

    let listed = LocationSetService::new(&database)
        .list_locations(None, None)
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[actix_rt::test]
#[serial]
async fn test_prune_removes_only_expired_entries() {
    let Some(database) = live_database(STORE_TEST_DATABASE).await else {
        return;
    };
    let collection = database.collection::<SearchLogEntry>(SEARCH_LOG_COLLECTION);
    collection.drop().await.unwrap();

    let service = SearchLogService::new(&database);
    service.record_search(&log_entry("Old Town", 400)).await.unwrap();
    service.record_search(&log_entry("Denver, CO", 1)).await.unwrap();

    assert_eq!(service.prune_search_log(365).await.unwrap(), 1);
    assert_eq!(service.prune_search_log(365).await.unwrap(), 0);

    let remaining = collection.find_one(doc! {}).await.unwrap().unwrap();
    assert_eq!(remaining.location, "Denver, CO");
    assert_eq!(collection.count_documents(doc! {}).await.unwrap(), 1);
}
