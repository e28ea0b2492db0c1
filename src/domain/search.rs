use serde::{Deserialize, Serialize};

use crate::entities::SeriesStatus;

/// Filter for [`crate::repositories::SeriesRepository::search`].
///
/// Every field is optional. A `None` or empty field does not restrict the
/// result; the present ones are combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSearch {
    pub library_ids: Option<Vec<String>>,
    pub collection_ids: Option<Vec<String>>,
    /// Case-insensitive substring of the metadata title.
    pub search_term: Option<String>,
    pub metadata_statuses: Option<Vec<SeriesStatus>>,
    /// Case-insensitive exact publisher names.
    pub publishers: Option<Vec<String>>,
}

impl SeriesSearch {
    pub fn with_library_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.library_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_collection_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collection_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_statuses<I>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = SeriesStatus>,
    {
        self.metadata_statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn with_publishers<I, S>(mut self, publishers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.publishers = Some(publishers.into_iter().map(Into::into).collect());
        self
    }

    /// Library ids to filter on, if any were given.
    pub fn library_ids(&self) -> Option<&[String]> {
        non_empty(&self.library_ids)
    }

    pub fn collection_ids(&self) -> Option<&[String]> {
        non_empty(&self.collection_ids)
    }

    /// The search term, ignoring blank input.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|term| !term.is_empty())
    }

    pub fn metadata_statuses(&self) -> Option<&[SeriesStatus]> {
        non_empty(&self.metadata_statuses)
    }

    pub fn publishers(&self) -> Option<&[String]> {
        non_empty(&self.publishers)
    }

    /// True when no field restricts the result.
    pub fn is_unrestricted(&self) -> bool {
        self.library_ids().is_none()
            && self.collection_ids().is_none()
            && self.search_term().is_none()
            && self.metadata_statuses().is_none()
            && self.publishers().is_none()
    }
}

fn non_empty<T>(values: &Option<Vec<T>>) -> Option<&[T]> {
    values.as_deref().filter(|values| !values.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_is_unrestricted() {
        assert!(SeriesSearch::default().is_unrestricted());
    }

    #[test]
    fn test_empty_filters_are_ignored() {
        let search = SeriesSearch::default()
            .with_library_ids(Vec::<String>::new())
            .with_search_term("")
            .with_statuses([]);
        assert!(search.is_unrestricted());
        assert!(search.library_ids().is_none());
    }

    #[test]
    fn test_builders_set_filters() {
        let search = SeriesSearch::default()
            .with_library_ids(["lib1"])
            .with_publishers(["DC"])
            .with_statuses([SeriesStatus::Ongoing]);
        assert_eq!(search.library_ids(), Some(&["lib1".to_string()][..]));
        assert_eq!(search.publishers(), Some(&["DC".to_string()][..]));
        assert_eq!(search.metadata_statuses(), Some(&[SeriesStatus::Ongoing][..]));
        assert!(!search.is_unrestricted());
    }
}
