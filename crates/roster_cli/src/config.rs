//! Runtime configuration resolved from environment variables.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - Resolution itself performs no I/O; validation of the log directory is
//!   left to `roster_core::init_logging`.

use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "ROSTER_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "ROSTER_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ROSTER_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging stays off when `None`.
    pub log_dir: Option<String>,
}

impl CliConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        Self {
            db_path: value(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME)),
            log_level: value(LOG_LEVEL_VAR)
                .unwrap_or_else(|| roster_core::default_log_level().to_string()),
            log_dir: value(LOG_DIR_VAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn resolve(pairs: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = resolve(&[]);
        assert_eq!(config.db_path, PathBuf::from("roster.sqlite3"));
        assert_eq!(config.log_level, roster_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn values_are_trimmed_and_blank_means_unset() {
        let config = resolve(&[
            (DB_PATH_VAR, "  /tmp/candidates.sqlite3 "),
            (LOG_LEVEL_VAR, " warn"),
            (LOG_DIR_VAR, "   "),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/candidates.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn log_dir_is_passed_through() {
        let config = resolve(&[(LOG_DIR_VAR, "/var/log/roster")]);
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/roster"));
    }
}
