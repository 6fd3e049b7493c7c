//! View model types representing renderable list state.
//!
//! View models are immutable, display-ready copies of a [`ListSnapshot`]:
//! cells are formatted, search matches are pre-computed as highlight ranges,
//! and the loading / error / empty distinctions are resolved into separate
//! fields so the renderer has no decisions left to make.
//!
//! # Example
//!
//! ```
//! use recluta::app::{ListSnapshot, ListStatus};
//! use recluta::domain::Client;
//! use recluta::ui::{compute_viewmodel, Loading};
//!
//! let snapshot = ListSnapshot::<Client> { status: ListStatus::Loading, ..Default::default() };
//! let vm = compute_viewmodel(&snapshot, "");
//!
//! assert_eq!(vm.loading, Loading::Initial);
//! assert!(vm.empty_state.is_none());
//! ```

use crate::app::{ListSnapshot, ListStatus};
use crate::domain::format::truncate;
use crate::domain::ListEntity;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Longest cell rendered before truncation.
pub const MAX_CELL_CHARS: usize = 32;

const KEYBINDINGS: &str = "/texto: buscar | n/p: página | r: recargar | clear: limpiar | q: salir";

/// Complete view model for one list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    /// Title and active-filter summary.
    pub header: HeaderInfo,

    /// Column headings.
    pub columns: Vec<String>,

    /// Rows of the current page.
    pub rows: Vec<DisplayRow>,

    /// Pagination and keybindings.
    pub footer: FooterInfo,

    /// How a fetch in flight should be shown.
    pub loading: Loading,

    /// Cause of the last failed fetch.
    pub error_banner: Option<String>,

    /// Shown when a successful fetch returned nothing.
    pub empty_state: Option<EmptyState>,

    /// Current search text, when one is being typed.
    pub search_bar: Option<SearchBarInfo>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Backend id, used by row commands such as deactivate.
    pub id: i64,

    /// Formatted cells, one per column.
    pub cells: Vec<String>,

    /// Character ranges of the first cell that match the search text.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// `"<Title> (<total>)"`.
    pub title: String,

    /// `name=value` pairs of the active filters, if any.
    pub filters: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// `"Página p de n"`.
    pub page_label: String,

    /// Command help.
    pub keybindings: String,
}

/// Loading indicator variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    /// Nothing in flight.
    None,
    /// First load, nothing to show yet.
    Initial,
    /// Refetch over the previous items, which stay visible.
    Overlay,
}

/// Empty state message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

/// Builds the view model for `snapshot`, highlighting matches of `search`.
///
/// `search` is the raw text being typed, which may run ahead of the
/// debounced filter the snapshot was fetched with.
#[must_use]
pub fn compute_viewmodel<E: ListEntity>(snapshot: &ListSnapshot<E>, search: &str) -> ListViewModel {
    let search = search.trim();
    let matcher = (!search.is_empty()).then(SkimMatcherV2::default);

    let rows = snapshot
        .items
        .iter()
        .map(|item| DisplayRow {
            id: item.id(),
            cells: item.cells().iter().map(|c| truncate(c, MAX_CELL_CHARS)).collect(),
            highlight_ranges: matcher
                .as_ref()
                .map_or_else(Vec::new, |m| compute_highlight_ranges(m, item.search_text(), search)),
        })
        .collect();

    let loading = match snapshot.status {
        ListStatus::Loading if !snapshot.items.is_empty() => Loading::Overlay,
        ListStatus::Loading | ListStatus::Idle if snapshot.items.is_empty() => Loading::Initial,
        _ => Loading::None,
    };

    let error_banner = match snapshot.status {
        ListStatus::Failed => snapshot.error_message.clone(),
        _ => None,
    };

    let empty_state = (snapshot.status == ListStatus::Ready && snapshot.items.is_empty()).then(|| {
        if snapshot.filters.is_empty() {
            EmptyState {
                message: format!("No hay {} registrados", E::TITLE.to_lowercase()),
                subtitle: "Los registros nuevos aparecerán aquí".to_string(),
            }
        } else {
            EmptyState {
                message: format!("No se encontraron {}", E::TITLE.to_lowercase()),
                subtitle: "Ajusta o limpia los filtros de búsqueda".to_string(),
            }
        }
    });

    let filters = (!snapshot.filters.is_empty()).then(|| {
        snapshot
            .filters
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ")
    });

    ListViewModel {
        header: HeaderInfo {
            title: format!("{} ({})", E::TITLE, snapshot.total_count),
            filters,
        },
        columns: E::COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        rows,
        footer: FooterInfo {
            page_label: format!("Página {} de {}", snapshot.page, snapshot.total_pages.max(1)),
            keybindings: KEYBINDINGS.to_string(),
        },
        loading,
        error_banner,
        empty_state,
        search_bar: (!search.is_empty()).then(|| SearchBarInfo {
            query: search.to_string(),
        }),
    }
}

/// Computes character index ranges to highlight for a fuzzy match.
///
/// Consecutive matched indices are coalesced into `(start, end)` ranges so the
/// renderer emits one styled segment per run.
fn compute_highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
