//! Credential provider and login session.
//!
//! The HTTP client never reads a global token. It is handed a
//! [`CredentialProvider`] at construction and asks it for the bearer token on
//! every request. [`SessionStore`] is the process-wide implementation: login
//! populates it, and an explicit logout or a 401 response clears it. Each
//! transition is published on a `watch` channel so the shell can send the user
//! back to the login prompt.

use crate::domain::User;
use std::sync::RwLock;
use tokio::sync::watch;

/// An authenticated session returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// JWT access token sent as `Authorization: Bearer <token>`.
    pub token: String,
    /// Account the token belongs to.
    pub user: User,
}

/// Session lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// No session has been established yet.
    Anonymous,
    /// A login succeeded.
    LoggedIn {
        /// Display name of the logged-in user.
        user_name: String,
    },
    /// The user logged out explicitly.
    LoggedOut,
    /// The backend rejected the token; the user must log in again.
    Expired,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Explicit logout.
    Logout,
    /// The backend answered 401.
    Rejected,
}

/// Source of the bearer token attached to API requests.
pub trait CredentialProvider: Send + Sync {
    /// Returns the current token, if a session is active.
    fn token(&self) -> Option<String>;

    /// Installs a new session after a successful login.
    fn begin(&self, session: Session);

    /// Drops the current session.
    fn clear(&self, reason: SessionEnd);

    /// Drops the session only if `token` is still the current one.
    ///
    /// Returns `false` when a newer session (or none) is in place, so a late
    /// rejection of an old token leaves a fresh login alone.
    fn clear_if(&self, token: &str, reason: SessionEnd) -> bool;
}

/// In-memory session holder with change notifications.
#[derive(Debug)]
pub struct SessionStore {
    session: RwLock<Option<Session>>,
    events: watch::Sender<SessionEvent>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = watch::channel(SessionEvent::Anonymous);
        Self {
            session: RwLock::new(None),
            events,
        }
    }

    /// Subscribes to session transitions.
    ///
    /// The receiver starts at the latest event.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Returns the logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.user.clone()))
    }
}

impl CredentialProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.session
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.token.clone()))
    }

    fn begin(&self, session: Session) {
        let user_name = session.user.nombre.clone();
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }
        tracing::debug!(user = %user_name, "session started");
        self.events.send_replace(SessionEvent::LoggedIn { user_name });
    }

    fn clear(&self, reason: SessionEnd) {
        if let Ok(mut guard) = self.session.write() {
            guard.take();
        }
        self.publish_end(reason);
    }

    fn clear_if(&self, token: &str, reason: SessionEnd) -> bool {
        let cleared = self
            .session
            .write()
            .map(|mut guard| {
                if guard.as_ref().is_some_and(|s| s.token == token) {
                    guard.take();
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);

        if cleared {
            self.publish_end(reason);
        } else {
            tracing::debug!(reason = ?reason, "token already superseded; session kept");
        }
        cleared
    }
}

impl SessionStore {
    fn publish_end(&self, reason: SessionEnd) {
        let event = match reason {
            SessionEnd::Logout => SessionEvent::LoggedOut,
            SessionEnd::Rejected => SessionEvent::Expired,
        };
        tracing::debug!(event = ?event, "session cleared");
        self.events.send_replace(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn session() -> Session {
        Session {
            token: "tok-123".to_string(),
            user: User {
                id: 1,
                nombre: "Marta".to_string(),
                email: "marta@example.com".to_string(),
                rol: Role::ReclutadorLider,
                activo: true,
                fecha_creacion: None,
            },
        }
    }

    #[test]
    fn login_then_rejection_clears_token_and_notifies() {
        let store = SessionStore::new();
        let events = store.subscribe();
        assert_eq!(store.token(), None);

        store.begin(session());
        assert_eq!(store.token().as_deref(), Some("tok-123"));
        assert_eq!(
            *events.borrow(),
            SessionEvent::LoggedIn {
                user_name: "Marta".to_string()
            }
        );

        store.clear(SessionEnd::Rejected);
        assert_eq!(store.token(), None);
        assert_eq!(store.current_user(), None);
        assert_eq!(*events.borrow(), SessionEvent::Expired);
    }

    #[test]
    fn logout_publishes_logged_out() {
        let store = SessionStore::new();
        store.begin(session());
        store.clear(SessionEnd::Logout);
        assert_eq!(*store.subscribe().borrow(), SessionEvent::LoggedOut);
    }

    #[test]
    fn rejecting_an_old_token_keeps_the_newer_session() {
        let store = SessionStore::new();
        store.begin(Session {
            token: "old".to_string(),
            ..session()
        });
        store.begin(session());
        let events = store.subscribe();

        assert!(!store.clear_if("old", SessionEnd::Rejected));
        assert_eq!(store.token().as_deref(), Some("tok-123"));
        assert!(!events.has_changed().unwrap());

        assert!(store.clear_if("tok-123", SessionEnd::Rejected));
        assert_eq!(store.token(), None);
        assert_eq!(*events.borrow(), SessionEvent::Expired);
    }
}
