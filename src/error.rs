//! Error types for the repository layer.

use sea_orm::DbErr;

/// Errors surfaced by repository operations.
///
/// Database failures are passed through untouched. The remaining variants
/// describe rows that exist but cannot be mapped back to a domain value.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Series {series_id} has a malformed url: {source}")]
    InvalidUrl {
        series_id: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Series {series_id} has a negative book count: {value}")]
    NegativeBookCount { series_id: String, value: i32 },

    #[error("Series {series_id} book count {value} does not fit the book_count column")]
    BookCountOutOfRange { series_id: String, value: u32 },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
