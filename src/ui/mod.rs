//! Terminal presentation of list snapshots.
//!
//! ```text
//! ListSnapshot → compute_viewmodel → ListViewModel → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types and their computation
//! - [`renderer`]: Plain-text renderer
//! - [`helpers`]: Character-aware padding and highlight helpers

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use viewmodel::{
    compute_viewmodel, DisplayRow, EmptyState, FooterInfo, HeaderInfo, ListViewModel, Loading,
    SearchBarInfo,
};
