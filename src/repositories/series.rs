//! Series repository for database operations.

use std::collections::HashMap;

use log::{debug, warn};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveEnum, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QuerySelect, RelationTrait,
};
use url::Url;

use crate::domain::{Series, SeriesSearch};
use crate::entities::{collection_series, series, series_metadata};
use crate::error::{RepositoryError, Result};
use crate::utils::datetime;

/// Repository for series-related database operations.
///
/// Every method is a single statement against the given connection, so a
/// caller can pass a `DatabaseTransaction` to group several of them.
pub struct SeriesRepository;

impl SeriesRepository {
    /// Get every series in storage order.
    pub async fn find_all<C>(conn: &C) -> Result<Vec<Series>>
    where
        C: ConnectionTrait,
    {
        debug!("Loading all series");
        to_domain(series::Entity::find().all(conn).await?)
    }

    /// Get a single series by id.
    pub async fn find_by_id<C>(conn: &C, id: &str) -> Result<Option<Series>>
    where
        C: ConnectionTrait,
    {
        series::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(Series::try_from)
            .transpose()
    }

    /// Get all series owned by a library.
    pub async fn find_all_by_library_id<C>(conn: &C, library_id: &str) -> Result<Vec<Series>>
    where
        C: ConnectionTrait,
    {
        to_domain(
            series::Entity::find()
                .filter(series::Column::LibraryId.eq(library_id))
                .all(conn)
                .await?,
        )
    }

    /// Get the series of a library whose url is not one of `urls`.
    ///
    /// A library scan passes every url it found on disk; what comes back is
    /// gone from disk.
    pub async fn find_all_by_library_id_and_url_not_in<C>(
        conn: &C,
        library_id: &str,
        urls: &[Url],
    ) -> Result<Vec<Series>>
    where
        C: ConnectionTrait,
    {
        if urls.is_empty() {
            return Self::find_all_by_library_id(conn, library_id).await;
        }

        to_domain(
            series::Entity::find()
                .filter(series::Column::LibraryId.eq(library_id))
                .filter(series::Column::Url.is_not_in(urls.iter().map(Url::to_string)))
                .all(conn)
                .await?,
        )
    }

    /// Get the series at `url` inside a library.
    pub async fn find_by_library_id_and_url<C>(conn: &C, library_id: &str, url: &Url) -> Result<Option<Series>>
    where
        C: ConnectionTrait,
    {
        series::Entity::find()
            .filter(series::Column::LibraryId.eq(library_id))
            .filter(series::Column::Url.eq(url.to_string()))
            .one(conn)
            .await?
            .map(Series::try_from)
            .transpose()
    }

    /// Get series whose metadata title equals `title`, ignoring case.
    ///
    /// Both sides are folded by the database's `LOWER`, so the exact stored
    /// text always matches.
    pub async fn find_all_by_title<C>(conn: &C, title: &str) -> Result<Vec<Series>>
    where
        C: ConnectionTrait,
    {
        to_domain(
            series::Entity::find()
                .distinct()
                .join(JoinType::InnerJoin, series::Relation::Metadata.def())
                .filter(lower_eq(series_metadata::Column::Title, title))
                .all(conn)
                .await?,
        )
    }

    /// Look up the owning library of a series.
    pub async fn get_library_id<C>(conn: &C, series_id: &str) -> Result<Option<String>>
    where
        C: ConnectionTrait,
    {
        Ok(series::Entity::find_by_id(series_id)
            .select_only()
            .column(series::Column::LibraryId)
            .into_tuple::<String>()
            .one(conn)
            .await?)
    }

    /// Get the ids of all series owned by a library.
    pub async fn find_all_ids_by_library_id<C>(conn: &C, library_id: &str) -> Result<Vec<String>>
    where
        C: ConnectionTrait,
    {
        Ok(series::Entity::find()
            .select_only()
            .column(series::Column::Id)
            .filter(series::Column::LibraryId.eq(library_id))
            .into_tuple::<String>()
            .all(conn)
            .await?)
    }

    /// Search series with the filters present in `search`.
    ///
    /// Collections and metadata are left-joined so that a series without
    /// either still matches when the related filter is absent.
    pub async fn search<C>(conn: &C, search: &SeriesSearch) -> Result<Vec<Series>>
    where
        C: ConnectionTrait,
    {
        debug!("Searching series with {:?}", search);
        to_domain(
            series::Entity::find()
                .distinct()
                .join(JoinType::LeftJoin, series::Relation::CollectionSeries.def())
                .join(JoinType::LeftJoin, series::Relation::Metadata.def())
                .filter(search_condition(search))
                .all(conn)
                .await?,
        )
    }

    /// Insert a new series.
    ///
    /// Book count and audit timestamps are left to their column defaults.
    pub async fn insert<C>(conn: &C, series: &Series) -> Result<()>
    where
        C: ConnectionTrait,
    {
        debug!("Inserting series {} ({})", series.id, series.url);
        series::Entity::insert(series::ActiveModel::from(series))
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    /// Overwrite the mutable columns of a series and refresh its last
    /// modified date.
    ///
    /// An id that matches no row is not an error. A book count that does not
    /// fit the column is rejected before anything is written.
    pub async fn update<C>(conn: &C, series: &Series) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let book_count = i32::try_from(series.book_count).map_err(|_| RepositoryError::BookCountOutOfRange {
            series_id: series.id.clone(),
            value: series.book_count,
        })?;

        let result = series::Entity::update_many()
            .col_expr(series::Column::Name, Expr::value(series.name.clone()))
            .col_expr(series::Column::Url, Expr::value(series.url.to_string()))
            .col_expr(series::Column::FileLastModified, Expr::value(series.file_last_modified))
            .col_expr(series::Column::LibraryId, Expr::value(series.library_id.clone()))
            .col_expr(series::Column::BookCount, Expr::value(book_count))
            .col_expr(series::Column::LastModifiedDate, Expr::value(datetime::now_utc()))
            .filter(series::Column::Id.eq(series.id.as_str()))
            .exec(conn)
            .await?;
        debug!("Updated series {} ({} row(s))", series.id, result.rows_affected);
        Ok(())
    }

    /// Delete a series by id.
    pub async fn delete<C>(conn: &C, series_id: &str) -> Result<()>
    where
        C: ConnectionTrait,
    {
        series::Entity::delete_by_id(series_id).exec(conn).await?;
        Ok(())
    }

    /// Delete every series whose id is in `series_ids`.
    pub async fn delete_many<C>(conn: &C, series_ids: &[String]) -> Result<()>
    where
        C: ConnectionTrait,
    {
        if series_ids.is_empty() {
            return Ok(());
        }

        let result = series::Entity::delete_many()
            .filter(series::Column::Id.is_in(series_ids.iter().map(String::as_str)))
            .exec(conn)
            .await?;
        debug!("Deleted {} series", result.rows_affected);
        Ok(())
    }

    /// Delete all series.
    pub async fn delete_all<C>(conn: &C) -> Result<()>
    where
        C: ConnectionTrait,
    {
        series::Entity::delete_many().exec(conn).await?;
        Ok(())
    }

    /// Count all series.
    pub async fn count<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(series::Entity::find().count(conn).await?)
    }

    /// Count series per owning library.
    pub async fn count_grouped_by_library_id<C>(conn: &C) -> Result<HashMap<String, u64>>
    where
        C: ConnectionTrait,
    {
        let rows = series::Entity::find()
            .select_only()
            .column(series::Column::LibraryId)
            .column_as(Expr::col(series::Column::Id).count(), "count")
            .group_by(series::Column::LibraryId)
            .into_tuple::<(String, i64)>()
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(library_id, count)| (library_id, u64::try_from(count).unwrap_or_default()))
            .collect())
    }
}

/// Fold the present filters of a search into one AND condition.
fn search_condition(search: &SeriesSearch) -> Condition {
    Condition::all()
        .add_option(search.library_ids().map(|ids| series::Column::LibraryId.is_in(ids.iter().map(String::as_str))))
        .add_option(
            search
                .collection_ids()
                .map(|ids| collection_series::Column::CollectionId.is_in(ids.iter().map(String::as_str))),
        )
        .add_option(
            search
                .search_term()
                .map(|term| contains_ignore_case(series_metadata::Column::Title, term)),
        )
        .add_option(
            search
                .metadata_statuses()
                .map(|statuses| series_metadata::Column::Status.is_in(statuses.iter().map(ActiveEnum::to_value))),
        )
        .add_option(search.publishers().map(|publishers| {
            publishers.iter().fold(Condition::any(), |any, publisher| {
                any.add(lower_eq(series_metadata::Column::Publisher, publisher))
            })
        }))
}

/// `LOWER(column)` as an expression that can take a comparison.
fn lower<T>(column: T) -> Expr
where
    T: ColumnTrait,
{
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
}

/// `LOWER(column) = LOWER(value)`.
fn lower_eq<T>(column: T, value: &str) -> SimpleExpr
where
    T: ColumnTrait,
{
    lower(column).eq(Func::lower(Expr::val(value)))
}

/// `LOWER(column) LIKE LOWER('%term%')` with `term` matched literally.
fn contains_ignore_case<T>(column: T, term: &str) -> SimpleExpr
where
    T: ColumnTrait,
{
    Expr::cust_with_exprs(
        format!("$1 LIKE LOWER($2) ESCAPE '{}'", LIKE_ESCAPE),
        [
            SimpleExpr::from(lower(column)),
            Expr::val(format!("%{}%", escape_like(term))).into(),
        ],
    )
}

const LIKE_ESCAPE: char = '\\';

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn to_domain(models: Vec<series::Model>) -> Result<Vec<Series>> {
    models
        .into_iter()
        .map(|model| {
            Series::try_from(model).inspect_err(|e| warn!("Failed to map series row: {}", e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(search: &SeriesSearch) -> String {
        series::Entity::find()
            .filter(search_condition(search))
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%_off"), r"100\%\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("saga"), "saga");
    }

    #[test]
    fn test_search_term_uses_escape_clause() {
        let built = sql(&SeriesSearch::default().with_search_term("Saga"));
        assert!(built.contains("LIKE LOWER('%Saga%') ESCAPE"), "{built}");
    }

    #[test]
    fn test_unrestricted_search_has_no_filter() {
        let built = sql(&SeriesSearch::default());
        assert!(built.ends_with("WHERE TRUE"), "{built}");
    }

    #[test]
    fn test_publishers_are_compared_lower_cased() {
        let built = sql(&SeriesSearch::default().with_publishers(["Image Comics"]));
        assert!(built.contains("LOWER(\"series_metadata\".\"publisher\") = LOWER('Image Comics')"), "{built}");
    }

    #[test]
    fn test_filters_are_joined_with_and() {
        let built = sql(&SeriesSearch::default()
            .with_library_ids(["lib1"])
            .with_search_term("saga"));
        assert!(built.contains(" AND "), "{built}");
    }
}
