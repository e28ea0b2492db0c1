#![allow(dead_code)]

use bookvault::domain::{Series, SeriesStatus};
use bookvault::entities::{collection_series, series_metadata};
use bookvault::repositories::SeriesRepository;
use bookvault::storage::LocalStorage;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{ActiveValue, EntityTrait};
use url::Url;

pub async fn storage() -> LocalStorage {
    LocalStorage::new(None).await.expect("in-memory storage should open")
}

pub fn file_stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap().and_hms_opt(9, 15, 30).unwrap()
}

pub fn url(path: &str) -> Url {
    Url::parse(&format!("file:///comics/{}", path)).unwrap()
}

/// Insert a series named after its folder and return it.
pub async fn add_series(storage: &LocalStorage, library_id: &str, folder: &str) -> Series {
    let series = Series::new(folder, url(folder), file_stamp(), library_id);
    SeriesRepository::insert(&storage.conn, &series).await.unwrap();
    series
}

pub async fn add_metadata(storage: &LocalStorage, series_id: &str, title: &str, status: SeriesStatus, publisher: &str) {
    let model = series_metadata::ActiveModel {
        series_id: ActiveValue::Set(series_id.to_string()),
        title: ActiveValue::Set(title.to_string()),
        status: ActiveValue::Set(status),
        publisher: ActiveValue::Set(publisher.to_string()),
    };
    series_metadata::Entity::insert(model)
        .exec_without_returning(&storage.conn)
        .await
        .unwrap();
}

pub async fn add_to_collection(storage: &LocalStorage, collection_id: &str, series_id: &str, number: i32) {
    let model = collection_series::ActiveModel {
        collection_id: ActiveValue::Set(collection_id.to_string()),
        series_id: ActiveValue::Set(series_id.to_string()),
        number: ActiveValue::Set(number),
    };
    collection_series::Entity::insert(model)
        .exec_without_returning(&storage.conn)
        .await
        .unwrap();
}

pub fn sorted_ids(series: &[Series]) -> Vec<String> {
    let mut ids: Vec<String> = series.iter().map(|s| s.id.clone()).collect();
    ids.sort();
    ids
}

pub fn sorted<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    let mut ids: Vec<String> = ids.iter().map(|s| s.as_ref().to_string()).collect();
    ids.sort();
    ids
}
