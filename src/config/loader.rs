//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AuditConfig, CalendarConfig, PermissionConfig, WorkforceConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/workforce/
/// ├── permissions.yaml # Required tiers per operation
/// ├── calendar.yaml    # Non-working weekdays
/// └── audit.yaml       # Audit queue settings
/// ```
///
/// # Example
///
/// ```no_run
/// use workforce_calendar::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/workforce").unwrap();
/// println!("Leave scheduling requires {}", loader.config().permissions().leave_scheduling);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: WorkforceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any of the three files is missing or contains
    /// invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let permissions = Self::load_yaml::<PermissionConfig>(&path.join("permissions.yaml"))?;
        let calendar = Self::load_yaml::<CalendarConfig>(&path.join("calendar.yaml"))?;
        let audit = Self::load_yaml::<AuditConfig>(&path.join("audit.yaml"))?;

        Ok(Self {
            config: WorkforceConfig::new(permissions, calendar, audit),
        })
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

    /// Returns the loaded configuration.
    pub fn config(&self) -> &WorkforceConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> WorkforceConfig {
        self.config
    }
}
