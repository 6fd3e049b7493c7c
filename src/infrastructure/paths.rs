//! Data and configuration directory resolution.
//!
//! Follows the XDG base directory layout:
//!
//! | Kind   | Variable          | Fallback                | Path                       |
//! |--------|-------------------|-------------------------|----------------------------|
//! | data   | `XDG_DATA_HOME`   | `~/.local/share`        | `<base>/recluta`           |
//! | config | `XDG_CONFIG_HOME` | `~/.config`             | `<base>/recluta`           |
//!
//! Without `HOME` the base falls back to the current directory. The config
//! file location can be overridden with `RECLUTA_CONFIG`.

use std::path::PathBuf;

const APP_DIR: &str = "recluta";

/// Name of the configuration file inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "recluta.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_VAR: &str = "RECLUTA_CONFIG";

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn base_dir(lookup: &impl Fn(&str) -> Option<String>, xdg_var: &str, home_suffix: &[&str]) -> PathBuf {
    if let Some(dir) = lookup(xdg_var) {
        return PathBuf::from(dir);
    }
    let mut path = lookup("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    path.extend(home_suffix);
    path
}

/// Resolves the data directory using `lookup` for environment access.
pub fn resolve_data_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    base_dir(&lookup, "XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR)
}

/// Resolves the configuration file path using `lookup` for environment access.
pub fn resolve_config_file(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(path) = lookup(CONFIG_PATH_VAR) {
        return expand_tilde_with(&path, lookup("HOME").as_deref());
    }
    base_dir(&lookup, "XDG_CONFIG_HOME", &[".config"])
        .join(APP_DIR)
        .join(CONFIG_FILE_NAME)
}

/// Returns the directory holding the span file.
///
/// # Examples
///
/// ```
/// let dir = recluta::infrastructure::data_dir();
/// assert!(dir.ends_with("recluta"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    resolve_data_dir(env)
}

/// Returns the configuration file path.
#[must_use]
pub fn config_file() -> PathBuf {
    resolve_config_file(env)
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            PathBuf::from(format!("{home}{rest}"))
        }
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn xdg_variables_win_over_home() {
        let vars = lookup(&[("HOME", "/home/ana"), ("XDG_DATA_HOME", "/data")]);
        assert_eq!(resolve_data_dir(&vars), PathBuf::from("/data/recluta"));
        assert_eq!(
            resolve_config_file(&vars),
            PathBuf::from("/home/ana/.config/recluta/recluta.toml")
        );
    }

    #[test]
    fn home_fallback() {
        let vars = lookup(&[("HOME", "/home/ana")]);
        assert_eq!(resolve_data_dir(&vars), PathBuf::from("/home/ana/.local/share/recluta"));
    }

    #[test]
    fn explicit_config_path_expands_tilde() {
        let vars = lookup(&[("HOME", "/home/ana"), (CONFIG_PATH_VAR, "~/cfg/recluta.toml")]);
        assert_eq!(resolve_config_file(&vars), PathBuf::from("/home/ana/cfg/recluta.toml"));
    }
}
