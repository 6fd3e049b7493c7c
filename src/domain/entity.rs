//! Paginated list payloads and the per-entity schema trait.
//!
//! Every list endpoint answers with the same envelope:
//!
//! ```json
//! { "candidatos": [ ... ], "total": 42, "pages": 5, "current_page": 1 }
//! ```
//!
//! The collection key differs per entity, so decoding goes through
//! [`ListEntity::COLLECTION_KEY`]. Items are validated against the typed
//! schema at this boundary; a single malformed item fails the whole page.

use crate::domain::error::{ReclutaError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// How a filter field is edited in a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Primary free-text search box, debounced with the search delay.
    Search,
    /// Secondary free-text field (dates, ids), debounced with the filter delay.
    Text,
    /// Closed set of values picked from a select; applied immediately.
    Choice(&'static [&'static str]),
}

/// A named filter accepted by a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    /// Query parameter name sent to the backend.
    pub name: &'static str,
    /// Editing behavior.
    pub kind: FilterKind,
}

/// Schema of an entity that can be listed, fetched and deactivated.
///
/// Implemented by every typed record the backend exposes as a paginated
/// collection. The associated constants tie the type to its endpoint.
pub trait ListEntity:
    DeserializeOwned + Serialize + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static
{
    /// Path segment under the API base URL, e.g. `candidatos`.
    const RESOURCE: &'static str;

    /// Key holding the item array in a list response.
    const COLLECTION_KEY: &'static str;

    /// Display title of the list view.
    const TITLE: &'static str;

    /// Filters the endpoint understands.
    const FILTERS: &'static [FilterSpec];

    /// Column headings, matching [`cells`](Self::cells) one to one.
    const COLUMNS: &'static [&'static str];

    /// Backend identifier.
    fn id(&self) -> i64;

    /// Display cells for one table row.
    fn cells(&self) -> Vec<String>;

    /// Text the search highlight is computed against (first column).
    fn search_text(&self) -> &str;

    /// Looks up a filter by name.
    #[must_use]
    fn filter(name: &str) -> Option<&'static FilterSpec> {
        Self::FILTERS.iter().find(|f| f.name == name)
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<E> {
    /// Items on this page, in backend order.
    pub items: Vec<E>,
    /// Total number of pages for the query.
    pub total_pages: u32,
    /// Total number of matching items across all pages.
    pub total_count: u64,
}

impl<E> Default for Page<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_count: 0,
        }
    }
}

/// Wire envelope, without the entity-specific collection.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    pages: u32,
}

impl<E: ListEntity> Page<E> {
    /// Decodes a list response body into a typed page.
    ///
    /// # Errors
    ///
    /// Returns [`ReclutaError::Decode`] if the collection key is missing or any
    /// item does not match the schema of `E`.
    ///
    /// # Examples
    ///
    /// ```
    /// use recluta::domain::{Client, Page};
    ///
    /// let body = serde_json::json!({
    ///     "clientes": [{"id": 1, "nombre": "Acme", "ccp": "ACM-01", "activo": true}],
    ///     "total": 1,
    ///     "pages": 1,
    ///     "current_page": 1
    /// });
    /// let page: Page<Client> = Page::from_json(body)?;
    /// assert_eq!(page.items[0].ccp, "ACM-01");
    /// # Ok::<(), recluta::ReclutaError>(())
    /// ```
    pub fn from_json(mut body: serde_json::Value) -> Result<Self> {
        let items = body
            .get_mut(E::COLLECTION_KEY)
            .map(serde_json::Value::take)
            .ok_or_else(|| {
                ReclutaError::Decode(format!("missing `{}` in list response", E::COLLECTION_KEY))
            })?;

        let items: Vec<E> = serde_json::from_value(items)
            .map_err(|e| ReclutaError::Decode(format!("{}: {e}", E::RESOURCE)))?;

        let envelope: Envelope = serde_json::from_value(body)
            .map_err(|e| ReclutaError::Decode(format!("{} envelope: {e}", E::RESOURCE)))?;

        Ok(Self {
            items,
            total_pages: envelope.pages,
            total_count: envelope.total,
        })
    }
}
