//! User ("usuario") schema, shared by the user list and the login session.

use super::entity::{FilterSpec, ListEntity};
use super::format::format_date;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role of a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Ejecutivo,
    Reclutador,
    ReclutadorLider,
}

impl Role {
    /// Spanish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ejecutivo => "Ejecutivo",
            Self::Reclutador => "Reclutador",
            Self::ReclutadorLider => "Reclutador Líder",
        }
    }
}

/// A staff account as returned by `/usuarios` and `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub rol: Role,
    #[serde(default = "default_active")]
    pub activo: bool,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
}

const fn default_active() -> bool {
    true
}

impl ListEntity for User {
    const RESOURCE: &'static str = "usuarios";
    const COLLECTION_KEY: &'static str = "usuarios";
    const TITLE: &'static str = "Usuarios";
    const FILTERS: &'static [FilterSpec] = &[];
    const COLUMNS: &'static [&'static str] = &["Nombre", "Email", "Rol", "Estado", "Alta"];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nombre.clone(),
            self.email.clone(),
            self.rol.label().to_string(),
            if self.activo { "Activo" } else { "Inactivo" }.to_string(),
            format_date(self.fecha_creacion.as_ref()),
        ]
    }

    fn search_text(&self) -> &str {
        &self.nombre
    }
}
