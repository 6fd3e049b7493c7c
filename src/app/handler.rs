//! Event handling and state transition logic for one list view.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. The view or a debounced-value watcher raises a [`Trigger`]
//! 2. Fetch tasks report back with `FetchCompleted` / `FetchFailed`
//! 3. [`handle_event`] mutates [`ListState`] and returns [`Action`]s
//! 4. The controller executes the actions and publishes a new snapshot
//!
//! # Ordering
//!
//! Every issued fetch gets the next sequence number. A completion is applied
//! only if its sequence number is still the latest one, so the visible items
//! always belong to the most recently *initiated* request regardless of the
//! order in which responses arrive. Superseded results are discarded silently.

use super::actions::{Action, Notification};
use super::state::{ListState, ListStatus};
use crate::api::normalize_filter_value;
use crate::domain::{ListEntity, Page};

/// A reason to re-read the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The view was mounted; load page 1.
    Mount,
    /// A filter value changed. An empty value removes the filter.
    FilterChanged {
        /// Filter (query parameter) name.
        name: String,
        /// New raw value.
        value: String,
    },
    /// The user navigated to another page.
    PageChanged(u32),
    /// Every filter was reset.
    FiltersCleared,
    /// Something else invalidated the list (create, update, deactivate).
    Refresh,
}

/// Inputs to the list state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<E> {
    /// A user- or watcher-initiated recomputation.
    Recompute(Trigger),

    /// A fetch resolved successfully.
    FetchCompleted {
        /// Sequence number the fetch was issued with.
        seq: u64,
        /// Fetched page.
        page: Page<E>,
    },

    /// A fetch failed.
    FetchFailed {
        /// Sequence number the fetch was issued with.
        seq: u64,
        /// User-facing cause.
        message: String,
    },

    /// The owning view is gone. Later events are ignored.
    Teardown,
}

/// Processes an event, mutates list state, and returns actions to execute.
///
/// # Returns
///
/// `(changed, actions)`: whether the observable state changed (the caller
/// republishes its snapshot) and the side effects to run in order.
///
/// # Example
///
/// ```
/// use recluta::app::{handle_event, Action, Event, ListState, ListStatus, Trigger};
/// use recluta::domain::Client;
///
/// let mut state = ListState::<Client>::new(10);
/// let (changed, actions) = handle_event(&mut state, Event::Recompute(Trigger::Mount));
///
/// assert!(changed);
/// assert_eq!(state.status, ListStatus::Loading);
/// assert!(matches!(&actions[..], [Action::Fetch { seq: 1, .. }]));
/// ```
pub fn handle_event<E: ListEntity>(state: &mut ListState<E>, event: Event<E>) -> (bool, Vec<Action>) {
    if state.closed {
        tracing::debug!(entity = E::RESOURCE, "event after teardown ignored");
        return (false, vec![]);
    }

    match event {
        Event::Recompute(trigger) => recompute(state, trigger),
        Event::FetchCompleted { seq, page } => {
            if seq != state.latest_seq {
                tracing::debug!(entity = E::RESOURCE, seq, latest = state.latest_seq, "stale page discarded");
                return (false, vec![]);
            }
            state.apply_page(page);
            (true, vec![])
        }
        Event::FetchFailed { seq, message } => {
            if seq != state.latest_seq {
                tracing::debug!(entity = E::RESOURCE, seq, latest = state.latest_seq, "stale failure discarded");
                return (false, vec![]);
            }
            tracing::warn!(entity = E::RESOURCE, seq, error = %message, "list fetch failed");
            state.status = ListStatus::Failed;
            state.error_message = Some(message.clone());
            (true, vec![Action::Notify(Notification::Error(message))])
        }
        Event::Teardown => {
            tracing::debug!(entity = E::RESOURCE, "list torn down");
            state.closed = true;
            (false, vec![])
        }
    }
}

fn recompute<E: ListEntity>(state: &mut ListState<E>, trigger: Trigger) -> (bool, Vec<Action>) {
    match trigger {
        Trigger::Mount | Trigger::Refresh => {}
        Trigger::FilterChanged { name, value } => {
            match normalize_filter_value(&value) {
                Some(value) => {
                    state.filters.insert(name, value);
                }
                None => {
                    state.filters.remove(&name);
                }
            }
            state.page = 1;
        }
        Trigger::PageChanged(page) => {
            if page < 1 || page > state.total_pages {
                tracing::debug!(page, total_pages = state.total_pages, "page out of range ignored");
                return (false, vec![]);
            }
            state.page = page;
        }
        Trigger::FiltersCleared => {
            state.filters.clear();
            state.page = 1;
        }
    }

    state.latest_seq += 1;
    state.status = ListStatus::Loading;

    let query = state.query();
    tracing::debug!(
        entity = E::RESOURCE,
        seq = state.latest_seq,
        page = query.page,
        filters = ?query.filters,
        "fetch issued"
    );
    (true, vec![Action::Fetch { seq: state.latest_seq, query }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Client;

    fn client(id: i64, nombre: &str) -> Client {
        Client {
            id,
            nombre: nombre.to_string(),
            ccp: format!("CCP-{id}"),
            activo: true,
            total_vacantes: None,
            fecha_creacion: None,
        }
    }

    fn page(items: Vec<Client>, total_pages: u32) -> Page<Client> {
        let total_count = items.len() as u64;
        Page {
            items,
            total_pages,
            total_count,
        }
    }

    fn fetch_of(actions: &[Action]) -> (u64, crate::api::ListQuery) {
        match actions {
            [Action::Fetch { seq, query }] => (*seq, query.clone()),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn run(state: &mut ListState<Client>, trigger: Trigger) -> (u64, crate::api::ListQuery) {
        let (_, actions) = handle_event(state, Event::Recompute(trigger));
        fetch_of(&actions)
    }

    /// A state that has loaded `total_pages` pages and sits on `page`.
    fn loaded(total_pages: u32, page_no: u32) -> ListState<Client> {
        let mut state = ListState::new(10);
        let (seq, _) = run(&mut state, Trigger::Mount);
        handle_event(&mut state, Event::FetchCompleted { seq, page: page(vec![client(1, "Acme")], total_pages) });
        if page_no != 1 {
            let (seq, _) = run(&mut state, Trigger::PageChanged(page_no));
            handle_event(&mut state, Event::FetchCompleted { seq, page: page(vec![client(2, "Globex")], total_pages) });
        }
        state
    }

    #[test]
    fn mount_fetches_first_page_without_filters() {
        let mut state = ListState::<Client>::new(10);
        let (seq, query) = run(&mut state, Trigger::Mount);
        assert_eq!(seq, 1);
        assert_eq!(query, crate::api::ListQuery::new(1, 10));
        assert_eq!(state.status, ListStatus::Loading);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = loaded(6, 5);
        assert_eq!(state.page, 5);

        let (_, query) = run(
            &mut state,
            Trigger::FilterChanged {
                name: "estado".to_string(),
                value: "activo".to_string(),
            },
        );
        assert_eq!(query.page, 1);
        assert_eq!(query.filters.get("estado").map(String::as_str), Some("activo"));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn empty_filter_is_omitted_from_request() {
        let mut state = loaded(3, 1);
        run(
            &mut state,
            Trigger::FilterChanged {
                name: "search".to_string(),
                value: "acme".to_string(),
            },
        );
        let (_, query) = run(
            &mut state,
            Trigger::FilterChanged {
                name: "search".to_string(),
                value: String::new(),
            },
        );
        assert!(query.filters.is_empty());
        assert_eq!(query.params(), crate::api::ListQuery::new(1, 10).params());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = loaded(3, 1);
        let (seq_a, _) = run(&mut state, Trigger::Refresh);
        let (seq_b, query_b) = run(&mut state, Trigger::PageChanged(2));
        assert_eq!(query_b.page, 2);

        let (changed, _) = handle_event(&mut state, Event::FetchCompleted { seq: seq_b, page: page(vec![client(20, "B")], 3) });
        assert!(changed);

        let (changed, actions) = handle_event(&mut state, Event::FetchCompleted { seq: seq_a, page: page(vec![client(10, "A")], 3) });
        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state.page, 2);
        assert_eq!(state.items, vec![client(20, "B")]);
        assert_eq!(state.status, ListStatus::Ready);
    }

    #[test]
    fn stale_failure_is_not_reported() {
        let mut state = loaded(3, 1);
        let (seq_a, _) = run(&mut state, Trigger::Refresh);
        run(&mut state, Trigger::Refresh);

        let (changed, actions) = handle_event(
            &mut state,
            Event::FetchFailed {
                seq: seq_a,
                message: "timeout".to_string(),
            },
        );
        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state.status, ListStatus::Loading);
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn failure_retains_prior_items() {
        let mut state = ListState::new(10);
        let (seq, _) = run(&mut state, Trigger::Mount);
        let items = vec![client(1, "x"), client(2, "y")];
        handle_event(&mut state, Event::FetchCompleted { seq, page: page(items.clone(), 1) });

        let (seq, _) = run(&mut state, Trigger::Refresh);
        let (changed, actions) = handle_event(
            &mut state,
            Event::FetchFailed {
                seq,
                message: "Error 500: Internal Server Error".to_string(),
            },
        );

        assert!(changed);
        assert_eq!(state.items, items);
        assert_eq!(state.status, ListStatus::Failed);
        assert_eq!(state.error_message.as_deref(), Some("Error 500: Internal Server Error"));
        assert_eq!(
            actions,
            vec![Action::Notify(Notification::Error("Error 500: Internal Server Error".to_string()))]
        );
    }

    #[test]
    fn success_after_failure_clears_error() {
        let mut state = loaded(2, 1);
        let (seq, _) = run(&mut state, Trigger::Refresh);
        handle_event(&mut state, Event::FetchFailed { seq, message: "down".to_string() });

        let (seq, _) = run(&mut state, Trigger::Refresh);
        handle_event(&mut state, Event::FetchCompleted { seq, page: page(vec![], 0) });
        assert_eq!(state.status, ListStatus::Ready);
        assert_eq!(state.error_message, None);
        assert!(state.items.is_empty());
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut state = loaded(4, 2);
        let before = state.snapshot();

        for page_no in [0, 5] {
            let (changed, actions) = handle_event(&mut state, Event::Recompute(Trigger::PageChanged(page_no)));
            assert!(!changed);
            assert!(actions.is_empty());
        }
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn page_navigation_keeps_filters() {
        let mut state = loaded(4, 1);
        run(
            &mut state,
            Trigger::FilterChanged {
                name: "search".to_string(),
                value: "glo".to_string(),
            },
        );
        let seq = state.latest_seq;
        handle_event(&mut state, Event::FetchCompleted { seq, page: page(vec![client(2, "Globex")], 4) });

        let (_, query) = run(&mut state, Trigger::PageChanged(3));
        assert_eq!(query.page, 3);
        assert_eq!(query.filters.get("search").map(String::as_str), Some("glo"));
    }

    #[test]
    fn clear_filters_twice_matches_once() {
        let mut once = loaded(4, 3);
        run(
            &mut once,
            Trigger::FilterChanged {
                name: "estado".to_string(),
                value: "inactivo".to_string(),
            },
        );
        let mut twice = once.clone();

        let (_, query_once) = run(&mut once, Trigger::FiltersCleared);
        run(&mut twice, Trigger::FiltersCleared);
        let (_, query_twice) = run(&mut twice, Trigger::FiltersCleared);

        assert_eq!(query_once, query_twice);
        assert_eq!(once.page, 1);
        assert!(once.filters.is_empty());
        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn refresh_keeps_page_and_filters() {
        let mut state = loaded(3, 2);
        let (_, query) = run(&mut state, Trigger::Refresh);
        assert_eq!(query.page, 2);
        assert_eq!(state.items, vec![client(2, "Globex")]);
        assert_eq!(state.status, ListStatus::Loading);
    }

    #[test]
    fn teardown_discards_late_results() {
        let mut state = ListState::<Client>::new(10);
        let (seq, _) = run(&mut state, Trigger::Mount);
        handle_event(&mut state, Event::Teardown);

        let (changed, _) = handle_event(&mut state, Event::FetchCompleted { seq, page: page(vec![client(1, "late")], 1) });
        assert!(!changed);
        assert!(state.items.is_empty());

        let (changed, actions) = handle_event(&mut state, Event::Recompute(Trigger::Refresh));
        assert!(!changed);
        assert!(actions.is_empty());
    }
}
