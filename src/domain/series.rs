use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::entities::series;
use crate::error::RepositoryError;
use crate::utils::datetime;

/// A logical grouping of books, one per source folder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub name: String,
    pub url: Url,
    pub file_last_modified: NaiveDateTime,
    pub library_id: String,
    pub book_count: u32,
    pub created_date: DateTime<Local>,
    pub last_modified_date: DateTime<Local>,
}

impl Series {
    /// Create a series with a fresh identifier and no books.
    ///
    /// The audit timestamps are placeholders until the row is read back;
    /// the database assigns its own values on insert.
    pub fn new(
        name: impl Into<String>,
        url: Url,
        file_last_modified: NaiveDateTime,
        library_id: impl Into<String>,
    ) -> Self {
        let now = Local::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            url,
            file_last_modified,
            library_id: library_id.into(),
            book_count: 0,
            created_date: now,
            last_modified_date: now,
        }
    }
}

impl TryFrom<series::Model> for Series {
    type Error = RepositoryError;

    fn try_from(model: series::Model) -> Result<Self, Self::Error> {
        let url = Url::parse(&model.url).map_err(|source| RepositoryError::InvalidUrl {
            series_id: model.id.clone(),
            source,
        })?;
        let book_count = u32::try_from(model.book_count).map_err(|_| RepositoryError::NegativeBookCount {
            series_id: model.id.clone(),
            value: model.book_count,
        })?;

        Ok(Self {
            id: model.id,
            name: model.name,
            url,
            file_last_modified: model.file_last_modified,
            library_id: model.library_id,
            book_count,
            created_date: datetime::utc_to_local(model.created_date),
            last_modified_date: datetime::utc_to_local(model.last_modified_date),
        })
    }
}

impl From<&Series> for series::ActiveModel {
    /// Only the columns written on insert are set; the rest keep their
    /// storage defaults.
    fn from(series: &Series) -> Self {
        use sea_orm::ActiveValue::{NotSet, Set};

        Self {
            id: Set(series.id.clone()),
            name: Set(series.name.clone()),
            url: Set(series.url.to_string()),
            file_last_modified: Set(series.file_last_modified),
            library_id: Set(series.library_id.clone()),
            book_count: NotSet,
            created_date: NotSet,
            last_modified_date: NotSet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn model(url: &str, book_count: i32) -> series::Model {
        let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        series::Model {
            id: "s1".to_string(),
            name: "Saga".to_string(),
            url: url.to_string(),
            file_last_modified: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(8, 30, 0).unwrap(),
            library_id: "lib".to_string(),
            book_count,
            created_date: stamp,
            last_modified_date: stamp,
        }
    }

    #[test]
    fn test_model_maps_to_series() {
        let series = Series::try_from(model("file:///comics/saga", 12)).unwrap();
        assert_eq!(series.url.as_str(), "file:///comics/saga");
        assert_eq!(series.book_count, 12);
        assert_eq!(series.created_date.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_malformed_url_is_reported() {
        let err = Series::try_from(model("not a url", 1)).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidUrl { ref series_id, .. } if series_id == "s1"));
    }

    #[test]
    fn test_negative_book_count_is_reported() {
        let err = Series::try_from(model("file:///comics/saga", -3)).unwrap_err();
        assert!(matches!(err, RepositoryError::NegativeBookCount { value: -3, .. }));
    }

    #[test]
    fn test_new_series_has_unique_id() {
        let url = Url::parse("file:///comics/saga").unwrap();
        let stamp = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let a = Series::new("Saga", url.clone(), stamp, "lib");
        let b = Series::new("Saga", url, stamp, "lib");
        assert_ne!(a.id, b.id);
        assert_eq!(a.book_count, 0);
    }
}
