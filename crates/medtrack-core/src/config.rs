//! Application configuration.
//!
//! The host app writes a small JSON document at sign-in:
//!
//! ```json
//! {
//!   "current_user": { "name": "João Magne", "role": "admin" },
//!   "database_path": "/data/medtrack.db",
//!   "selection_policy": "restart"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::SelectionPolicy;
use crate::models::CurrentUser;

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Settings for one signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub current_user: CurrentUser,
    /// SQLite file; `None` keeps records in memory
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.current_user.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "current_user.name",
                "must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use std::io::Write;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_json_str(r#"{"current_user": {"name": "Ana Costa"}}"#).unwrap();
        assert_eq!(config.current_user.role, UserRole::Common);
        assert_eq!(config.database_path, None);
        assert_eq!(config.selection_policy, SelectionPolicy::Restart);
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_json_str(
            r#"{
                "current_user": {"name": "João Magne", "role": "admin"},
                "database_path": "/tmp/medtrack.db",
                "selection_policy": "normalize"
            }"#,
        )
        .unwrap();
        assert!(config.current_user.is_admin());
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/medtrack.db")));
        assert_eq!(config.selection_policy, SelectionPolicy::Normalize);
    }

    #[test]
    fn test_empty_user_name_rejected() {
        let err = AppConfig::from_json_str(r#"{"current_user": {"name": " "}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("current_user.name", _)));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = AppConfig::from_json_str(r#"{"current_user": {"name": "A", "role": "root"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"current_user": {{"name": "Pedro Souza"}}}}"#).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.current_user.name, "Pedro Souza");

        assert!(matches!(
            AppConfig::load("/nonexistent/medtrack.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
