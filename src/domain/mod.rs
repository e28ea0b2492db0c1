//! Plain-data domain types handed out by the repositories.
//!
//! Entities under [`crate::entities`] mirror the table layout; the types here
//! are what the rest of the application works with.

pub mod search;
pub mod series;

pub use crate::entities::SeriesStatus;
pub use search::SeriesSearch;
pub use series::Series;
