//! Side effects requested by the list state machine.
//!
//! [`handle_event`](super::handle_event) never performs I/O. It returns
//! [`Action`]s that the [`ListController`](super::ListController) executes:
//! spawning fetches and forwarding notifications to the view.

use crate::api::ListQuery;

/// Commands emitted by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Issue one read for `query`. Its result is tagged with `seq` so that
    /// superseded responses can be recognized and dropped.
    Fetch {
        /// Sequence number of this request.
        seq: u64,
        /// Page, page size and filters to request.
        query: ListQuery,
    },

    /// Show a transient notification.
    Notify(Notification),
}

/// A transient, toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// An operation succeeded.
    Success(String),
    /// An operation failed; the text is already user-facing.
    Error(String),
}

impl Notification {
    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }
}
