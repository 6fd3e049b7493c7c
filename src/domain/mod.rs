//! Domain layer for the Recluta client.
//!
//! This module contains the typed schemas of the records the recruiting backend
//! exposes, the paginated list envelope, and the crate error type. It has no
//! knowledge of HTTP or of the list controller; responses are validated into
//! these types at the fetch boundary.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entity`]: [`ListEntity`] trait, filter descriptors and [`Page`]
//! - [`candidate`], [`vacancy`], [`client`], [`interview`], [`user`]: entity schemas
//! - [`format`]: Cell formatting shared by the schemas

pub mod candidate;
pub mod client;
pub mod entity;
pub mod error;
pub mod format;
pub mod interview;
pub mod user;
pub mod vacancy;

pub use candidate::{Availability, Candidate, CandidateState, EnglishLevel};
pub use client::Client;
pub use entity::{FilterKind, FilterSpec, ListEntity, Page};
pub use error::{ReclutaError, Result};
pub use interview::{Interview, InterviewResult, InterviewType};
pub use user::{Role, User};
pub use vacancy::{Priority, Vacancy, VacancyState, WorkModality};
