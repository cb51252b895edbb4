//! Client-side filtering of an already fetched collection.

use shopadmin_core::{Resource, StatusKind};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter<S> {
    #[default]
    All,
    Only(S),
}

impl<S: StatusKind> StatusFilter<S> {
    /// `"all"` (any case) or a status wire value.
    pub fn parse(value: &str) -> Result<Self, shopadmin_core::DomainError> {
        if value.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            S::parse(value).map(StatusFilter::Only)
        }
    }

    pub fn matches(&self, status: S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<S> {
    pub status: StatusFilter<S>,
    pub search: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

impl<S> Default for FilterState<S> {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            search: String::new(),
            category: None,
            subcategory: None,
        }
    }
}

impl<S: StatusKind> FilterState<S> {
    pub fn is_identity(&self) -> bool {
        matches!(self.status, StatusFilter::All)
            && self.search.trim().is_empty()
            && blank(self.category.as_deref())
            && blank(self.subcategory.as_deref())
    }
}

fn blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn equals_filter(actual: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        None => true,
        Some(w) => actual.is_some_and(|a| a.trim().eq_ignore_ascii_case(w)),
    }
}

/// Does `item` pass every active predicate?
pub fn matches<R: Resource>(item: &R, filter: &FilterState<R::Status>) -> bool {
    if !filter.status.matches(item.status()) {
        return false;
    }
    if !equals_filter(item.category(), filter.category.as_deref()) {
        return false;
    }
    if !equals_filter(item.subcategory(), filter.subcategory.as_deref()) {
        return false;
    }
    let query = filter.search.trim().to_lowercase();
    query.is_empty()
        || item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
}

/// The filtered view over `items`, in their original order.
pub fn filter_items<'a, R: Resource>(items: &'a [R], filter: &FilterState<R::Status>) -> Vec<&'a R> {
    items.iter().filter(|item| matches(*item, filter)).collect()
}
