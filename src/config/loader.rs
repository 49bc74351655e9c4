//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Roster, TimesheetPeriod};

use super::types::{AssistantSettings, EngineConfig, ExportSettings, Settings};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml   # Period, export timings, AI service settings
/// └── roster.yaml     # Ordered employee roster
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Timesheet for {}", loader.period().label());
/// println!("{} employees", loader.roster().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML, an invalid period or duplicate
    ///   employee ids (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;
        let roster = Self::load_yaml::<Roster>(&path.join("roster.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(settings, roster),
        })
    }

    /// Builds a loader from in-memory parts, without touching the filesystem.
    pub fn from_parts(settings: Settings, roster: Roster) -> Self {
        Self {
            config: EngineConfig::new(settings, roster),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the roster.
    pub fn roster(&self) -> &Roster {
        self.config.roster()
    }

    /// Returns the timesheet period.
    pub fn period(&self) -> TimesheetPeriod {
        self.config.period()
    }

    /// Returns the export settings.
    pub fn export(&self) -> &ExportSettings {
        self.config.export()
    }

    /// Returns the AI service settings.
    pub fn assistant(&self) -> &AssistantSettings {
        self.config.assistant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn temp_config_dir(settings: &str, roster: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("timesheet-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("settings.yaml"), settings).unwrap();
        fs::write(dir.join("roster.yaml"), roster).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.period().year, 2023);
        assert_eq!(loader.period().month, 11);
        assert_eq!(loader.period().days_in_month(), 30);
        assert!(!loader.roster().is_empty());
    }

    #[test]
    fn test_default_export_timings() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.export().item_latency_ms, 800);
        assert_eq!(loader.export().success_display_ms, 4000);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("settings.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_invalid_month_is_a_parse_error() {
        let dir = temp_config_dir(
            "period: { year: 2023, month: 13 }\n",
            "- { id: emp_001, full_name: A, position: X }\n",
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("settings.yaml"));
                assert!(message.contains("Invalid timesheet period"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_duplicate_roster_ids_are_a_parse_error() {
        let dir = temp_config_dir(
            "period: { year: 2023, month: 11 }\n",
            "- { id: emp_001, full_name: A, position: X }\n- { id: emp_001, full_name: B, position: Y }\n",
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("roster.yaml"));
                assert!(message.contains("emp_001"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }
}
