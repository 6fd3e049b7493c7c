//! Vacancy ("vacante") schema.

use super::entity::{FilterKind, FilterSpec, ListEntity};
use super::format::{format_date, format_range, or_dash};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a vacancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacancyState {
    Abierta,
    Pausada,
    Cerrada,
    Cancelada,
}

impl VacancyState {
    /// Wire values accepted by the `estado` filter.
    pub const VALUES: &'static [&'static str] = &["abierta", "pausada", "cerrada", "cancelada"];

    /// Spanish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Abierta => "Abierta",
            Self::Pausada => "Pausada",
            Self::Cerrada => "Cerrada",
            Self::Cancelada => "Cancelada",
        }
    }
}

/// Business priority of a vacancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Baja,
    Media,
    Alta,
    Critica,
}

impl Priority {
    /// Spanish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Baja => "Baja",
            Self::Media => "Media",
            Self::Alta => "Alta",
            Self::Critica => "Crítica",
        }
    }
}

/// Where the job is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkModality {
    Presencial,
    Remoto,
    Hibrido,
}

impl WorkModality {
    /// Spanish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Presencial => "Presencial",
            Self::Remoto => "Remoto",
            Self::Hibrido => "Híbrido",
        }
    }
}

/// A vacancy as returned by `/vacantes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub estado: VacancyState,
    #[serde(default)]
    pub prioridad: Option<Priority>,
    #[serde(default)]
    pub modalidad: Option<WorkModality>,
    /// Number of openings.
    #[serde(default)]
    pub vacantes: Option<u32>,
    #[serde(default)]
    pub salario_min: Option<f64>,
    #[serde(default)]
    pub salario_max: Option<f64>,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub fecha_limite: Option<NaiveDateTime>,
    #[serde(default)]
    pub ejecutivo: Option<String>,
    #[serde(default)]
    pub reclutador: Option<String>,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
}

impl ListEntity for Vacancy {
    const RESOURCE: &'static str = "vacantes";
    const COLLECTION_KEY: &'static str = "vacantes";
    const TITLE: &'static str = "Vacantes";
    const FILTERS: &'static [FilterSpec] = &[FilterSpec {
        name: "estado",
        kind: FilterKind::Choice(VacancyState::VALUES),
    }];
    const COLUMNS: &'static [&'static str] = &[
        "Vacante",
        "Estado",
        "Prioridad",
        "Modalidad",
        "Plazas",
        "Salario",
        "Reclutador",
        "Fecha límite",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nombre.clone(),
            self.estado.label().to_string(),
            or_dash(self.prioridad.map(Priority::label)),
            or_dash(self.modalidad.map(WorkModality::label)),
            or_dash(self.vacantes),
            format_range(self.salario_min, self.salario_max),
            or_dash(self.reclutador.as_deref()),
            format_date(self.fecha_limite.as_ref()),
        ]
    }

    fn search_text(&self) -> &str {
        &self.nombre
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Page;

    #[test]
    fn decodes_optional_fields_as_absent() {
        let body = serde_json::json!({
            "vacantes": [{
                "id": 3,
                "nombre": "Backend Developer",
                "estado": "pausada",
                "prioridad": "critica",
                "modalidad": null,
                "vacantes": 2,
                "salario_min": 40000.0,
                "salario_max": null
            }],
            "total": 1,
            "pages": 1,
            "current_page": 1
        });

        let page: Page<Vacancy> = Page::from_json(body).unwrap();
        let vacancy = &page.items[0];
        assert_eq!(vacancy.estado, VacancyState::Pausada);
        assert_eq!(vacancy.cells()[2], "Crítica");
        assert_eq!(vacancy.cells()[3], "-");
        assert_eq!(vacancy.cells()[5], "desde $40,000.00");
    }

    #[test]
    fn only_status_is_filterable() {
        assert!(Vacancy::filter("estado").is_some());
        assert!(Vacancy::filter("search").is_none());
    }
}
