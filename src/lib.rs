//! Recluta: a terminal client for a recruiting management backend.
//!
//! Recluta lists the records a recruiting team works with (candidates,
//! vacancies, clients, interviews and staff accounts) from a REST backend and
//! keeps each list in sync with the user's filters and page:
//! - Free-text filters are debounced so typing does not flood the backend
//! - Every filter or page change issues exactly one fetch
//! - Out-of-order responses are reconciled: the newest request always wins
//! - Failures keep the previous rows visible and raise a notification

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal shell (main.rs)                           │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Debounced input values                           │
//! │  - List state machine (events → actions)            │
//! │  - ListController on Tokio                          │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐         ┌───────────────────────┐
//! │ UI Layer (ui/)        │         │ API Layer (api/)      │
//! │ - View models         │         │ - reqwest client      │
//! │ - Text rendering      │         │ - Session/credentials │
//! └───────────────────────┘         └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Entity schemas, Page, errors (domain/)           │
//! │  - Data/config paths (infrastructure/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, JSON-lines span export       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: List state machine, debounce, controller
//! - [`api`]: HTTP client, list queries, session handling
//! - [`domain`]: Entity schemas, pagination envelope, errors
//! - [`ui`]: View models and terminal rendering
//! - [`infrastructure`]: Directory resolution
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/recluta/recluta.toml
//! api_url = "http://localhost:5000/api"
//! timeout_secs = 30
//! page_size = 10
//! search_delay_ms = 800
//! filter_delay_ms = 500
//! trace_level = "debug"
//! trace_file = true
//! ```
//!
//! Every key can also be set through a `RECLUTA_<KEY>` environment variable,
//! which takes precedence over the file.
//!
//! # Example
//!
//! ```no_run
//! use recluta::api::{ApiClient, SessionStore};
//! use recluta::app::{Debounced, ListController};
//! use recluta::domain::Client;
//! use recluta::Config;
//! use std::sync::Arc;
//!
//! # async fn run() -> recluta::Result<()> {
//! let config = Config::load()?;
//! let client = ApiClient::new(&config, Arc::new(SessionStore::new()))?;
//! client.login("ana@example.com", "secret").await?;
//!
//! let clients = ListController::<Client>::new(Arc::new(client), config.page_size);
//! let mut search = Debounced::new(String::new(), config.search_delay());
//! clients.bind_debounced("search", search.subscribe());
//! clients.mount();
//!
//! search.update("acme".to_string());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, Event, ListController, ListSnapshot, ListState, ListStatus, Trigger};
pub use domain::{ReclutaError, Result};

use domain::{FilterKind, FilterSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Prefix of the environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "RECLUTA_";

/// Client configuration.
///
/// Built from defaults, then the TOML file, then `RECLUTA_*` environment
/// variables. See [`Config::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the REST API, including the `/api` prefix.
    ///
    /// Default: `http://localhost:5000/api`
    pub api_url: String,

    /// Per-request timeout in seconds. Default: 30
    pub timeout_secs: u64,

    /// Items per list page. Default: 10
    pub page_size: u32,

    /// Quiet period for primary search boxes, in milliseconds. Default: 800
    pub search_delay_ms: u64,

    /// Quiet period for other free-text filters, in milliseconds. Default: 500
    pub filter_delay_ms: u64,

    /// Tracing level used when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Export spans to `<data_dir>/recluta-spans.jsonl`. Default: `false`
    pub trace_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
            page_size: 10,
            search_delay_ms: 800,
            filter_delay_ms: u64::try_from(app::DEFAULT_DELAY.as_millis()).unwrap_or(500),
            trace_level: None,
            trace_file: false,
        }
    }
}

impl Config {
    /// Parses configuration from a string map on top of the defaults.
    ///
    /// Parsing is lenient: a value that fails to parse keeps the default for
    /// that key, and unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use recluta::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Applies string overrides to this configuration, leniently.
    #[must_use]
    pub fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        fn parsed<T: std::str::FromStr>(map: &BTreeMap<String, String>, key: &str) -> Option<T> {
            let raw = map.get(key)?;
            let value = raw.trim().parse().ok();
            if value.is_none() {
                tracing::debug!(key, value = %raw, "ignoring unparsable config value");
            }
            value
        }

        if let Some(url) = map.get("api_url").map(|s| s.trim()).filter(|s| !s.is_empty()) {
            self.api_url = url.to_string();
        }
        if let Some(v) = parsed(map, "timeout_secs").filter(|v: &u64| *v > 0) {
            self.timeout_secs = v;
        }
        if let Some(v) = parsed(map, "page_size").filter(|v: &u32| *v > 0) {
            self.page_size = v;
        }
        if let Some(v) = parsed(map, "search_delay_ms").filter(|v: &u64| *v > 0) {
            self.search_delay_ms = v;
        }
        if let Some(v) = parsed(map, "filter_delay_ms").filter(|v: &u64| *v > 0) {
            self.filter_delay_ms = v;
        }
        if let Some(level) = map.get("trace_level").filter(|s| !s.trim().is_empty()) {
            self.trace_level = Some(level.trim().to_string());
        }
        if let Some(v) = parsed(map, "trace_file") {
            self.trace_file = v;
        }
        self
    }

    /// Reads a TOML configuration file on top of the defaults.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ReclutaError::Config`] if the file is not valid TOML for this
    /// schema, or [`ReclutaError::Io`] if it exists but cannot be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&text).map_err(|e| ReclutaError::Config(format!("{}: {e}", path.display())))
    }

    /// Loads configuration from the config file and `RECLUTA_*` variables.
    ///
    /// # Errors
    ///
    /// Propagates [`Config::from_file`] errors.
    pub fn load() -> Result<Self> {
        let path = infrastructure::config_file();
        let config = Self::from_file(&path)?.with_overrides(&env_overrides(std::env::vars()));
        config.validate()?;
        Ok(config)
    }

    /// Checks values the lenient parsers cannot repair.
    ///
    /// # Errors
    ///
    /// Returns [`ReclutaError::Config`] for a zero page size, timeout or delay.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ReclutaError::Config("page_size must be greater than 0".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ReclutaError::Config("timeout_secs must be greater than 0".to_string()));
        }
        if self.search_delay_ms == 0 || self.filter_delay_ms == 0 {
            return Err(ReclutaError::Config("debounce delays must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Quiet period for primary search boxes.
    #[must_use]
    pub const fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    /// Quiet period for other free-text filters.
    #[must_use]
    pub const fn filter_delay(&self) -> Duration {
        Duration::from_millis(self.filter_delay_ms)
    }

    /// Quiet period for `filter`, or `None` if it applies immediately.
    #[must_use]
    pub const fn delay_for(&self, filter: &FilterSpec) -> Option<Duration> {
        match filter.kind {
            FilterKind::Search => Some(self.search_delay()),
            FilterKind::Text => Some(self.filter_delay()),
            FilterKind::Choice(_) => None,
        }
    }
}

/// Turns `RECLUTA_*` variables into configuration keys
/// (`RECLUTA_PAGE_SIZE` → `page_size`).
pub fn env_overrides(vars: impl IntoIterator<Item = (String, String)>) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(name, value)| {
            name.strip_prefix(ENV_PREFIX)
                .map(|key| (key.to_ascii_lowercase(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.search_delay(), Duration::from_millis(800));
        assert_eq!(config.filter_delay(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_then_env_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"https://rh.example.com/api\"\npage_size = 20").unwrap();

        let from_file = Config::from_file(file.path()).unwrap();
        assert_eq!(from_file.api_url, "https://rh.example.com/api");
        assert_eq!(from_file.page_size, 20);
        assert_eq!(from_file.timeout_secs, 30);

        let env = env_overrides(vec![
            ("RECLUTA_PAGE_SIZE".to_string(), "5".to_string()),
            ("RECLUTA_TRACE_FILE".to_string(), "true".to_string()),
            ("HOME".to_string(), "/home/ana".to_string()),
        ]);
        let merged = from_file.with_overrides(&env);
        assert_eq!(merged.page_size, 5);
        assert!(merged.trace_file);
        assert_eq!(merged.api_url, "https://rh.example.com/api");
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = \"many\"").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ReclutaError::Config(_)));
    }

    #[test]
    fn zero_values_in_map_keep_defaults() {
        let mut map = BTreeMap::new();
        map.insert("page_size".to_string(), "0".to_string());
        map.insert("search_delay_ms".to_string(), "0".to_string());
        let config = Config::from_map(&map);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.search_delay_ms, 800);
    }

    #[test]
    fn delays_follow_filter_kind() {
        let config = Config::default();
        let search = FilterSpec { name: "search", kind: FilterKind::Search };
        let desde = FilterSpec { name: "fecha_desde", kind: FilterKind::Text };
        let estado = FilterSpec { name: "estado", kind: FilterKind::Choice(&["activo"]) };
        assert_eq!(config.delay_for(&search), Some(Duration::from_millis(800)));
        assert_eq!(config.delay_for(&desde), Some(Duration::from_millis(500)));
        assert_eq!(config.delay_for(&estado), None);
    }
}
