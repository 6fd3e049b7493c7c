//! Async runtime around the list state machine.
//!
//! [`ListController`] owns one [`ListState`], feeds it events through
//! [`handle_event`], and executes the resulting actions: each `Fetch` becomes
//! a spawned task whose outcome is fed back as `FetchCompleted` or
//! `FetchFailed`. Snapshots are published on a `watch` channel after every
//! observable change, and notifications go to an optional unbounded channel.
//!
//! There is no request cancellation. A superseded fetch runs to completion and
//! its result is dropped by the sequence check in the handler.
//!
//! All methods that may issue a fetch must be called from within a Tokio
//! runtime.

use super::actions::{Action, Notification};
use super::debounce::Debounced;
use super::handler::{handle_event, Event, Trigger};
use super::state::{ListSnapshot, ListState};
use crate::api::{normalize_filter_value, ListQuery, ListSource};
use crate::domain::ListEntity;
use crate::Config;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

struct Shared<E: ListEntity> {
    state: Mutex<ListState<E>>,
    source: Arc<dyn ListSource<E>>,
    snapshots: watch::Sender<ListSnapshot<E>>,
    notifications: Option<mpsc::UnboundedSender<Notification>>,
}

impl<E: ListEntity> Shared<E> {
    fn dispatch(self: &Arc<Self>, event: Event<E>) {
        let actions = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let (changed, actions) = handle_event(&mut state, event);
            if changed {
                self.snapshots.send_replace(state.snapshot());
            }
            actions
        };

        for action in actions {
            match action {
                Action::Fetch { seq, query } => self.spawn_fetch(seq, query),
                Action::Notify(notification) => self.notify(notification),
            }
        }
    }

    fn spawn_fetch(self: &Arc<Self>, seq: u64, query: ListQuery) {
        let span = tracing::debug_span!("list_fetch", entity = E::RESOURCE, seq, page = query.page);
        let fetch = self.source.fetch_page(query);
        let shared = Arc::clone(self);

        tokio::spawn(
            async move {
                let event = match fetch.await {
                    Ok(page) => Event::FetchCompleted { seq, page },
                    Err(e) => Event::FetchFailed {
                        seq,
                        message: e.user_message(),
                    },
                };
                shared.dispatch(event);
            }
            .instrument(span),
        );
    }

    fn filter_value(&self, name: &str) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.filters.get(name).cloned()
    }

    fn notify(&self, notification: Notification) {
        if let Some(tx) = &self.notifications {
            if tx.send(notification).is_err() {
                tracing::debug!("notification receiver dropped");
            }
        }
    }
}

/// Keeps one entity list in sync with the backend.
///
/// Dropping the controller tears it down: watchers stop and results of
/// in-flight fetches are discarded when they arrive.
///
/// # Examples
///
/// ```no_run
/// use recluta::api::{ApiClient, SessionStore};
/// use recluta::app::ListController;
/// use recluta::domain::Candidate;
/// use recluta::Config;
/// use std::sync::Arc;
///
/// # async fn run() -> recluta::Result<()> {
/// let config = Config::default();
/// let client = ApiClient::new(&config, Arc::new(SessionStore::new()))?;
///
/// let list = ListController::<Candidate>::new(Arc::new(client), config.page_size);
/// let mut snapshots = list.subscribe();
/// list.mount();
/// list.set_filter("estado", "activo");
///
/// snapshots.changed().await.ok();
/// println!("{:?}", snapshots.borrow().status);
/// # Ok(())
/// # }
/// ```
pub struct ListController<E: ListEntity> {
    shared: Arc<Shared<E>>,
    watchers: Mutex<Vec<JoinHandle<()>>>,
}

impl<E: ListEntity> std::fmt::Debug for ListController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("entity", &E::RESOURCE)
            .field("snapshot", &*self.shared.snapshots.borrow())
            .finish_non_exhaustive()
    }
}

impl<E: ListEntity> ListController<E> {
    /// Creates a controller on page 1 with no filters. Nothing is fetched
    /// until [`mount`](Self::mount).
    #[must_use]
    pub fn new(source: Arc<dyn ListSource<E>>, page_size: u32) -> Self {
        Self::build(source, page_size, None)
    }

    /// Like [`new`](Self::new), routing failure notifications to `tx`.
    #[must_use]
    pub fn with_notifications(
        source: Arc<dyn ListSource<E>>,
        page_size: u32,
        tx: mpsc::UnboundedSender<Notification>,
    ) -> Self {
        Self::build(source, page_size, Some(tx))
    }

    fn build(
        source: Arc<dyn ListSource<E>>,
        page_size: u32,
        notifications: Option<mpsc::UnboundedSender<Notification>>,
    ) -> Self {
        let state = ListState::new(page_size);
        let (snapshots, _) = watch::channel(state.snapshot());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                source,
                snapshots,
                notifications,
            }),
            watchers: Mutex::new(Vec::new()),
        }
    }

    /// Loads the first page.
    pub fn mount(&self) {
        self.recompute(Trigger::Mount);
    }

    /// Re-reads the list for `trigger`.
    ///
    /// This is the single entry point every operation goes through.
    pub fn recompute(&self, trigger: Trigger) {
        self.shared.dispatch(Event::Recompute(trigger));
    }

    /// Sets one filter and reloads from page 1. An empty value clears it.
    pub fn set_filter(&self, name: &str, value: &str) {
        self.recompute(Trigger::FilterChanged {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Navigates to page `n`. Out-of-range pages are ignored.
    pub fn set_page(&self, n: u32) {
        self.recompute(Trigger::PageChanged(n));
    }

    /// Navigates one page forward, if there is one.
    pub fn next_page(&self) {
        let page = self.snapshot().page;
        self.set_page(page.saturating_add(1));
    }

    /// Navigates one page back, if there is one.
    pub fn previous_page(&self) {
        let page = self.snapshot().page;
        self.set_page(page.saturating_sub(1));
    }

    /// Removes every filter and reloads from page 1.
    pub fn clear_filters(&self) {
        self.recompute(Trigger::FiltersCleared);
    }

    /// Re-reads the current page with the current filters.
    pub fn refresh(&self) {
        self.recompute(Trigger::Refresh);
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot<E> {
        self.shared.snapshots.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<E>> {
        self.shared.snapshots.subscribe()
    }

    /// Applies every settled value of `stable` to the filter `name`.
    ///
    /// A settled value equal to the filter already in effect (for instance an
    /// emptied search box after [`clear_filters`](Self::clear_filters)) issues
    /// no fetch.
    ///
    /// Typically fed by [`Debounced::subscribe`](super::Debounced::subscribe).
    /// The watcher ends when the controller is dropped or the sender side
    /// closes.
    pub fn bind_debounced(&self, name: &str, mut stable: watch::Receiver<String>) {
        let shared: Weak<Shared<E>> = Arc::downgrade(&self.shared);
        let name = name.to_string();

        let watcher = tokio::spawn(async move {
            while stable.changed().await.is_ok() {
                let value = stable.borrow_and_update().clone();
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                if shared.filter_value(&name) == normalize_filter_value(&value) {
                    tracing::debug!(filter = %name, "debounced value already applied");
                    continue;
                }
                tracing::debug!(filter = %name, value = %value, "debounced filter settled");
                shared.dispatch(Event::Recompute(Trigger::FilterChanged {
                    name: name.clone(),
                    value,
                }));
            }
        });

        self.watchers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(watcher);
    }

    /// Creates one bound [`Debounced`] input per free-text filter of `E`.
    ///
    /// Each input waits for [`Config::delay_for`] its filter kind. Filters
    /// with a closed set of values get no input and are applied through
    /// [`set_filter`](Self::set_filter).
    pub fn debounce_filters(&self, config: &Config) -> BTreeMap<&'static str, Debounced<String>> {
        E::FILTERS
            .iter()
            .filter_map(|spec| {
                let delay = config.delay_for(spec)?;
                let input = Debounced::new(String::new(), delay);
                self.bind_debounced(spec.name, input.subscribe());
                Some((spec.name, input))
            })
            .collect()
    }

    /// Marks the list as torn down. Later results and triggers are ignored.
    pub fn teardown(&self) {
        for watcher in self
            .watchers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
        {
            watcher.abort();
        }
        self.shared.dispatch(Event::Teardown);
    }
}

impl<E: ListEntity> Drop for ListController<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
