//! Client ("cliente") schema.
//!
//! Clients are identified to recruiters by their CCP (clave-cliente-proyecto),
//! which the backend stores upper-cased.

use super::entity::{FilterKind, FilterSpec, ListEntity};
use super::format::{format_date, or_dash};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A client as returned by `/clientes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub nombre: String,
    pub ccp: String,
    #[serde(default = "default_active")]
    pub activo: bool,
    #[serde(default)]
    pub total_vacantes: Option<u32>,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
}

const fn default_active() -> bool {
    true
}

impl ListEntity for Client {
    const RESOURCE: &'static str = "clientes";
    const COLLECTION_KEY: &'static str = "clientes";
    const TITLE: &'static str = "Clientes";
    const FILTERS: &'static [FilterSpec] = &[FilterSpec {
        name: "search",
        kind: FilterKind::Search,
    }];
    const COLUMNS: &'static [&'static str] = &["Cliente", "CCP", "Estado", "Vacantes", "Alta"];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nombre.clone(),
            self.ccp.clone(),
            if self.activo { "Activo" } else { "Inactivo" }.to_string(),
            or_dash(self.total_vacantes),
            format_date(self.fecha_creacion.as_ref()),
        ]
    }

    fn search_text(&self) -> &str {
        &self.nombre
    }
}
