//! Candidate schema.
//!
//! Candidates are people in the recruiting pipeline. Deleting one through the
//! API deactivates it server-side rather than removing the record.

use super::entity::{FilterKind, FilterSpec, ListEntity};
use super::format::{format_currency, format_date, or_dash};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateState {
    Activo,
    Inactivo,
    Blacklist,
}

impl CandidateState {
    /// Wire values accepted by the `estado` filter.
    pub const VALUES: &'static [&'static str] = &["activo", "inactivo", "blacklist"];

    /// Spanish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Activo => "Activo",
            Self::Inactivo => "Inactivo",
            Self::Blacklist => "Lista Negra",
        }
    }
}

/// How soon a candidate can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "inmediata")]
    Inmediata,
    #[serde(rename = "15_dias")]
    QuinceDias,
    #[serde(rename = "30_dias")]
    TreintaDias,
    #[serde(rename = "a_convenir")]
    AConvenir,
}

impl Availability {
    /// Spanish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inmediata => "Inmediata",
            Self::QuinceDias => "15 días",
            Self::TreintaDias => "30 días",
            Self::AConvenir => "A convenir",
        }
    }
}

/// Self-reported English proficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnglishLevel {
    Basico,
    Intermedio,
    Avanzado,
    Nativo,
}

impl EnglishLevel {
    /// Spanish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basico => "Básico",
            Self::Intermedio => "Intermedio",
            Self::Avanzado => "Avanzado",
            Self::Nativo => "Nativo",
        }
    }
}

/// A candidate as returned by `/candidatos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    #[serde(default)]
    pub telefono: Option<String>,
    pub estado: CandidateState,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub experiencia_anos: Option<u32>,
    #[serde(default)]
    pub salario_esperado: Option<f64>,
    #[serde(default)]
    pub disponibilidad: Option<Availability>,
    #[serde(default)]
    pub nivel_ingles: Option<EnglishLevel>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub cv_url: Option<String>,
    /// Name of the assigned recruiter.
    #[serde(default)]
    pub reclutador: Option<String>,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
}

impl ListEntity for Candidate {
    const RESOURCE: &'static str = "candidatos";
    const COLLECTION_KEY: &'static str = "candidatos";
    const TITLE: &'static str = "Candidatos";
    const FILTERS: &'static [FilterSpec] = &[
        FilterSpec {
            name: "search",
            kind: FilterKind::Search,
        },
        FilterSpec {
            name: "estado",
            kind: FilterKind::Choice(CandidateState::VALUES),
        },
    ];
    const COLUMNS: &'static [&'static str] = &[
        "Nombre",
        "Email",
        "Estado",
        "Experiencia",
        "Salario esperado",
        "Disponibilidad",
        "Alta",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nombre.clone(),
            self.email.clone(),
            self.estado.label().to_string(),
            or_dash(self.experiencia_anos.map(|y| format!("{y} años"))),
            format_currency(self.salario_esperado),
            or_dash(self.disponibilidad.map(Availability::label)),
            format_date(self.fecha_creacion.as_ref()),
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
    fn decodes_backend_list_payload() {
        let body = serde_json::json!({
            "candidatos": [{
                "id": 7,
                "nombre": "Ana López",
                "email": "ana@example.com",
                "telefono": null,
                "estado": "activo",
                "experiencia_anos": 4,
                "salario_esperado": 32000.0,
                "disponibilidad": "15_dias",
                "nivel_ingles": "avanzado",
                "fecha_creacion": "2024-02-10T15:30:00.123456",
                "reclutador": "Luis"
            }],
            "total": 11,
            "pages": 2,
            "current_page": 1
        });

        let page: Page<Candidate> = Page::from_json(body).unwrap();
        assert_eq!(page.total_count, 11);
        assert_eq!(page.total_pages, 2);

        let candidate = &page.items[0];
        assert_eq!(candidate.disponibilidad, Some(Availability::QuinceDias));
        assert_eq!(
            candidate.cells(),
            vec![
                "Ana López",
                "ana@example.com",
                "Activo",
                "4 años",
                "$32,000.00",
                "15 días",
                "10/02/2024"
            ]
        );
    }

    #[test]
    fn rejects_unknown_state() {
        let body = serde_json::json!({
            "candidatos": [{"id": 1, "nombre": "X", "email": "x@y.z", "estado": "borrado"}],
            "total": 1,
            "pages": 1
        });
        assert!(Page::<Candidate>::from_json(body).is_err());
    }
}
