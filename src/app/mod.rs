//! Application layer: list state, the event-driven state machine, and the
//! async controller that runs it.
//!
//! ```text
//! keystrokes → Debounced ──stable──┐
//!                                  ▼
//! page / select / refresh ──→ Trigger → handle_event → ListState → snapshot (watch)
//!                                  ▲          │
//!                                  │        Action::Fetch
//!                                  └── FetchCompleted / FetchFailed ◀── ListSource
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`controller`]: [`ListController`], executing actions on Tokio
//! - [`debounce`]: [`Debounced`] input values
//! - [`handler`]: Event processing and ordering rules
//! - [`state`]: [`ListState`] and its [`ListSnapshot`]

pub mod actions;
pub mod controller;
pub mod debounce;
pub mod handler;
pub mod state;

pub use actions::{Action, Notification};
pub use controller::ListController;
pub use debounce::{Debounced, DEFAULT_DELAY};
pub use handler::{handle_event, Event, Trigger};
pub use state::{ListSnapshot, ListState, ListStatus};
