//! List query construction.
//!
//! A [`ListQuery`] captures everything a paginated read depends on: the page,
//! the page size and the active filters. Absent filters are never sent; an
//! empty or whitespace-only value is treated the same as absent so the backend
//! applies no constraint for it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalizes a raw filter value.
///
/// Returns `None` for empty or whitespace-only input, otherwise the trimmed
/// value.
///
/// # Examples
///
/// ```
/// use recluta::api::normalize_filter_value;
///
/// assert_eq!(normalize_filter_value("  ana "), Some("ana".to_string()));
/// assert_eq!(normalize_filter_value("   "), None);
/// ```
#[must_use]
pub fn normalize_filter_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parameters of one paginated list read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Active filters by name. Only non-empty values are stored.
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Creates a query for `page` with no filters.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            filters: BTreeMap::new(),
        }
    }

    /// Adds a filter, dropping it if the value normalizes to absent.
    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>, value: &str) -> Self {
        if let Some(value) = normalize_filter_value(value) {
            self.filters.insert(name.into(), value);
        }
        self
    }

    /// Returns the query-string parameters for this read.
    ///
    /// `page` and `per_page` always come first, followed by filters in name
    /// order. Filters with empty values are omitted.
    ///
    /// # Examples
    ///
    /// ```
    /// use recluta::api::ListQuery;
    ///
    /// let query = ListQuery::new(2, 10)
    ///     .with_filter("estado", "activo")
    ///     .with_filter("search", "");
    ///
    /// let params: Vec<(String, String)> = query.params();
    /// assert_eq!(params, vec![
    ///     ("page".to_string(), "2".to_string()),
    ///     ("per_page".to_string(), "10".to_string()),
    ///     ("estado".to_string(), "activo".to_string()),
    /// ]);
    /// ```
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(2 + self.filters.len());
        params.push(("page".to_string(), self.page.to_string()));
        params.push(("per_page".to_string(), self.page_size.to_string()));
        params.extend(
            self.filters
                .iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_equivalent_to_unset() {
        let unset = ListQuery::new(1, 10);
        let empty = ListQuery::new(1, 10).with_filter("search", "");
        assert_eq!(unset, empty);
        assert_eq!(unset.params(), empty.params());
    }

    #[test]
    fn filter_values_are_trimmed() {
        let query = ListQuery::new(1, 10).with_filter("search", "  acme  ");
        assert_eq!(query.filters.get("search").map(String::as_str), Some("acme"));
    }

    #[test]
    fn raw_empty_entries_are_not_sent() {
        let mut query = ListQuery::new(3, 5);
        query.filters.insert("estado".to_string(), " ".to_string());
        let names: Vec<String> = query.params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["page", "per_page"]);
    }
}
