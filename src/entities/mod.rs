pub mod collection_series;
pub mod series;
pub mod series_metadata;

pub use collection_series::Entity as CollectionSeries;
pub use series::Entity as Series;
pub use series_metadata::Entity as SeriesMetadata;
pub use series_metadata::SeriesStatus;
