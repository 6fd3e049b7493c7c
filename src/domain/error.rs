//! Error types for the Recluta client.
//!
//! This module defines the centralized error type [`ReclutaError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.
//!
//! List reads never surface these errors to the caller directly: the list
//! controller converts them into a failed status plus a user-facing message
//! (see [`ReclutaError::user_message`]). Write operations return them as-is.

use thiserror::Error;

/// Message shown when the backend could not be reached.
pub const NETWORK_ERROR_MESSAGE: &str = "Error de conexión. Verifica tu conexión a internet.";

/// The main error type for Recluta operations.
///
/// # Examples
///
/// ```
/// use recluta::ReclutaError;
///
/// let err = ReclutaError::Api { status: 404, message: Some("Candidato no encontrado".into()) };
/// assert_eq!(err.user_message(), "Candidato no encontrado");
/// ```
#[derive(Debug, Error)]
pub enum ReclutaError {
    /// The request never completed: connection refused, DNS failure or timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    ///
    /// `message` holds the `message` field of the JSON error body when the
    /// backend sent one.
    #[error("API error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable message from the response body.
        message: Option<String>,
    },

    /// The backend rejected the credentials (HTTP 401).
    ///
    /// The session has already been cleared when this error is returned.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The response body did not match the expected schema.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configured base URL or a derived endpoint URL is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReclutaError {
    /// Returns the text to show the user for this error.
    ///
    /// Backend messages are passed through verbatim. Without a message body the
    /// status code and its canonical reason are shown instead.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Api {
                status,
                message: None,
            } => {
                let reason = reqwest::StatusCode::from_u16(*status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown");
                format!("Error {status}: {reason}")
            }
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Unauthorized(message) => message.clone(),
            Self::Decode(_) | Self::InvalidUrl(_) | Self::Config(_) | Self::Io(_) => {
                "Error inesperado. Inténtalo de nuevo.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ReclutaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A specialized `Result` type for Recluta operations.
pub type Result<T> = std::result::Result<T, ReclutaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_is_passed_through() {
        let err = ReclutaError::Api {
            status: 400,
            message: Some("El email ya está registrado".to_string()),
        };
        assert_eq!(err.user_message(), "El email ya está registrado");
    }

    #[test]
    fn api_without_message_uses_status_reason() {
        let err = ReclutaError::Api {
            status: 503,
            message: None,
        };
        assert_eq!(err.user_message(), "Error 503: Service Unavailable");
    }

    #[test]
    fn network_errors_use_connectivity_message() {
        let err = ReclutaError::Network("connection refused".to_string());
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
    }
}
