//! Configuration handling shared by the terminal client and the
//! maintenance service

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default submission service address
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
/// Default submission timeout in seconds
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;
/// Default maintenance database
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/intake.db";
/// Default maintenance listen address
pub const DEFAULT_MAINTENANCE_BIND: &str = "127.0.0.1:8090";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntakeConfig {
    /// Submission service base URL
    pub api_base_url: Option<String>,
    /// Seconds before a stalled submission is reported as failed
    pub submit_timeout_secs: Option<u64>,
    /// Database holding question definitions (maintenance service)
    pub database_url: Option<String>,
    /// Listen address of the maintenance service
    pub maintenance_bind: Option<String>,
    /// Name shown in the header of the terminal client
    pub clinician_name: Option<String>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "patient-intake", "patient-intake")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: IntakeConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Apply environment overrides on top of the file values
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("INTAKE_API_URL") {
            self.api_base_url = Some(v);
        }
        if let Some(v) = var("INTAKE_SUBMIT_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) => self.submit_timeout_secs = Some(secs),
                Err(_) => tracing::warn!(value = %v, "ignoring invalid INTAKE_SUBMIT_TIMEOUT_SECS"),
            }
        }
        if let Some(v) = var("DATABASE_URL") {
            self.database_url = Some(v);
        }
        if let Some(v) = var("INTAKE_MAINTENANCE_BIND") {
            self.maintenance_bind = Some(v);
        }
        self
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(
            self.submit_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_SUBMIT_TIMEOUT_SECS),
        )
    }

    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn maintenance_bind(&self) -> &str {
        self.maintenance_bind
            .as_deref()
            .unwrap_or(DEFAULT_MAINTENANCE_BIND)
    }
}

/// Filesystem path of a file-backed SQLite URL
fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url.strip_prefix("sqlite:")?;
    if rest.contains(":memory:") {
        return None;
    }
    let path = rest.strip_prefix("//").unwrap_or(rest);
    let path = path.split('?').next().unwrap_or(path);
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// Create the directory a SQLite database file will live in
pub fn ensure_database_dir(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };
    let Some(parent) = path.parent().filter(|p| *p != Path::new("")) else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = IntakeConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.submit_timeout_secs.is_none());
        assert!(config.database_url.is_none());
        assert!(config.maintenance_bind.is_none());
        assert!(config.clinician_name.is_none());
    }

    #[test]
    fn test_default_accessors() {
        let config = IntakeConfig::default();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.submit_timeout(), Duration::from_secs(30));
        assert_eq!(config.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(config.maintenance_bind(), DEFAULT_MAINTENANCE_BIND);
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config = IntakeConfig {
            submit_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.submit_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_serialization() {
        let config = IntakeConfig {
            api_base_url: Some("https://intake.example.com".to_string()),
            submit_timeout_secs: Some(10),
            database_url: Some("sqlite::memory:".to_string()),
            maintenance_bind: Some("0.0.0.0:9000".to_string()),
            clinician_name: Some("Dra. Soto".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: IntakeConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.api_base_url(), "https://intake.example.com");
        assert_eq!(parsed.submit_timeout(), Duration::from_secs(10));
        assert_eq!(parsed.database_url(), "sqlite::memory:");
        assert_eq!(parsed.maintenance_bind(), "0.0.0.0:9000");
        assert_eq!(parsed.clinician_name.as_deref(), Some("Dra. Soto"));
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"api_base_url": "http://x", "unknown_field": "value"}"#;
        let parsed: IntakeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_base_url(), "http://x");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("INTAKE_API_URL", "http://override"),
            ("INTAKE_SUBMIT_TIMEOUT_SECS", "5"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]
        .into_iter()
        .collect();

        let config = IntakeConfig {
            api_base_url: Some("http://file".to_string()),
            maintenance_bind: Some("127.0.0.1:1".to_string()),
            ..Default::default()
        }
        .with_overrides_from(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_base_url(), "http://override");
        assert_eq!(config.submit_timeout(), Duration::from_secs(5));
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.maintenance_bind(), "127.0.0.1:1");
    }

    #[test]
    fn test_invalid_timeout_override_ignored() {
        let config = IntakeConfig {
            submit_timeout_secs: Some(12),
            ..Default::default()
        }
        .with_overrides_from(|k| (k == "INTAKE_SUBMIT_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert_eq!(config.submit_timeout(), Duration::from_secs(12));
    }

    #[test]
    fn test_load_returns_ok() {
        // Load returns defaults when no config file exists
        let result = IntakeConfig::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_sqlite_path() {
        assert_eq!(
            sqlite_path("sqlite://./data/intake.db"),
            Some(PathBuf::from("./data/intake.db"))
        );
        assert_eq!(
            sqlite_path("sqlite:intake.db?mode=rwc"),
            Some(PathBuf::from("intake.db"))
        );
        assert_eq!(sqlite_path("sqlite::memory:"), None);
        assert_eq!(sqlite_path("postgres://db/intake"), None);
    }

    #[test]
    fn test_ensure_database_dir_creates_parent() {
        let root = std::env::temp_dir().join(format!("intake-config-{}", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}/nested/intake.db", root.display());

        ensure_database_dir(&url).unwrap();
        assert!(root.join("nested").is_dir());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_ensure_database_dir_ignores_memory() {
        assert!(ensure_database_dir("sqlite::memory:").is_ok());
        assert!(ensure_database_dir("sqlite:intake.db").is_ok());
    }
}
