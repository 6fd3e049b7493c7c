//! List query state and its read-only snapshot.
//!
//! [`ListState`] is owned by exactly one list view. It holds the page cursor,
//! the active filters, the items of the last successful fetch and the fetch
//! lifecycle. Only [`handle_event`](super::handle_event) mutates it.
//!
//! # Invariants
//!
//! - `page >= 1` and `page_size > 0`.
//! - `items`, `total_pages` and `total_count` are replaced together, and only
//!   by the completion of the most recently issued fetch.
//! - `filters` never stores an empty value; clearing a filter removes the key.

use crate::api::ListQuery;
use crate::domain::{ListEntity, Page};
use std::collections::BTreeMap;

/// Lifecycle of the list's most recent fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The latest fetch succeeded.
    Ready,
    /// The latest fetch failed; `items` still hold the previous result.
    Failed,
}

/// Mutable state of one paginated list.
#[derive(Debug, Clone)]
pub struct ListState<E> {
    /// Current 1-based page.
    pub page: u32,
    /// Items per page, fixed for the lifetime of the view.
    pub page_size: u32,
    /// Active filters. Absent means no constraint.
    pub filters: BTreeMap<String, String>,
    /// Items of the last successful fetch.
    pub items: Vec<E>,
    /// Page count reported by the last successful fetch.
    pub total_pages: u32,
    /// Matching-item count reported by the last successful fetch.
    pub total_count: u64,
    /// Fetch lifecycle.
    pub status: ListStatus,
    /// User-facing cause of the last failure.
    pub error_message: Option<String>,
    /// Sequence number of the most recently issued fetch.
    pub latest_seq: u64,
    /// Set once the owning view is torn down.
    pub closed: bool,
}

impl<E: ListEntity> ListState<E> {
    /// Creates the state of a freshly mounted view: page 1, no filters.
    ///
    /// A `page_size` of zero is raised to one.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            filters: BTreeMap::new(),
            items: Vec::new(),
            total_pages: 0,
            total_count: 0,
            status: ListStatus::Idle,
            error_message: None,
            latest_seq: 0,
            closed: false,
        }
    }

    /// Returns the query for the current page and filters.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            page_size: self.page_size,
            filters: self.filters.clone(),
        }
    }

    /// Stores a fetched page, replacing the previous result wholesale.
    pub fn apply_page(&mut self, page: Page<E>) {
        self.items = page.items;
        self.total_pages = page.total_pages;
        self.total_count = page.total_count;
        self.status = ListStatus::Ready;
        self.error_message = None;
    }

    /// Returns a read-only copy for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot<E> {
        ListSnapshot {
            items: self.items.clone(),
            status: self.status,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_count: self.total_count,
            error_message: self.error_message.clone(),
            filters: self.filters.clone(),
        }
    }
}

/// What the list view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<E> {
    pub items: Vec<E>,
    pub status: ListStatus,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub error_message: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl<E> Default for ListSnapshot<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: ListStatus::Idle,
            page: 1,
            page_size: 1,
            total_pages: 0,
            total_count: 0,
            error_message: None,
            filters: BTreeMap::new(),
        }
    }
}

impl<E> ListSnapshot<E> {
    /// Returns `true` when a previous page can be requested.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` when a next page can be requested.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns `true` for a refetch over existing items, which renders as an
    /// overlay instead of a full loading state.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.status == ListStatus::Loading && !self.items.is_empty()
    }
}
