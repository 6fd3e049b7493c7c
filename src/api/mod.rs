//! Backend access.
//!
//! - [`client`]: [`ApiClient`], the authenticated HTTP client
//! - [`credentials`]: [`CredentialProvider`] and the [`SessionStore`] login session
//! - [`query`]: [`ListQuery`] and filter normalization
//! - [`source`]: [`ListSource`], the read seam used by the list controller

pub mod client;
pub mod credentials;
pub mod query;
pub mod source;

pub use client::ApiClient;
pub use credentials::{CredentialProvider, Session, SessionEnd, SessionEvent, SessionStore};
pub use query::{normalize_filter_value, ListQuery};
pub use source::ListSource;
