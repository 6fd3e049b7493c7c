//! Interview ("entrevista") schema.

use super::entity::{FilterKind, FilterSpec, ListEntity};
use super::format::{format_date_time, or_dash};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Interview channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Telefonica,
    Video,
    Presencial,
    Tecnica,
}

impl InterviewType {
    /// Spanish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Telefonica => "Telefónica",
            Self::Video => "Video",
            Self::Presencial => "Presencial",
            Self::Tecnica => "Técnica",
        }
    }
}

/// Outcome recorded after an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewResult {
    Pendiente,
    Aprobada,
    Rechazada,
    Reprogramar,
}

impl InterviewResult {
    /// Spanish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pendiente => "Pendiente",
            Self::Aprobada => "Aprobada",
            Self::Rechazada => "Rechazada",
            Self::Reprogramar => "Reprogramar",
        }
    }
}

/// An interview as returned by `/entrevistas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub id: i64,
    pub fecha: NaiveDateTime,
    pub tipo: InterviewType,
    #[serde(default = "default_result")]
    pub resultado: InterviewResult,
    /// Score from 1 to 10.
    #[serde(default)]
    pub puntuacion: Option<u8>,
    pub candidato_id: i64,
    pub vacante_id: i64,
    #[serde(default)]
    pub duracion_minutos: Option<u32>,
    /// Address for in-person interviews, link for video calls.
    #[serde(default)]
    pub ubicacion: Option<String>,
    /// Populated by the backend for display; not part of the stored record.
    #[serde(default)]
    pub candidato: Option<String>,
}

const fn default_result() -> InterviewResult {
    InterviewResult::Pendiente
}

impl ListEntity for Interview {
    const RESOURCE: &'static str = "entrevistas";
    const COLLECTION_KEY: &'static str = "entrevistas";
    const TITLE: &'static str = "Entrevistas";
    const FILTERS: &'static [FilterSpec] = &[
        FilterSpec {
            name: "fecha_desde",
            kind: FilterKind::Text,
        },
        FilterSpec {
            name: "fecha_hasta",
            kind: FilterKind::Text,
        },
    ];
    const COLUMNS: &'static [&'static str] =
        &["Candidato", "Fecha", "Tipo", "Resultado", "Puntuación", "Duración"];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.search_text().to_string(),
            format_date_time(Some(&self.fecha)),
            self.tipo.label().to_string(),
            self.resultado.label().to_string(),
            or_dash(self.puntuacion.map(|p| format!("{p}/10"))),
            or_dash(self.duracion_minutos.map(|m| format!("{m} min"))),
        ]
    }

    fn search_text(&self) -> &str {
        self.candidato.as_deref().unwrap_or("-")
    }
}
