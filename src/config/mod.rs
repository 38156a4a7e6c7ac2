//! Configuration loading and management for the workforce calendar engine.
//!
//! This module loads permission requirements, calendar generation settings
//! and audit settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use workforce_calendar::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/workforce").unwrap();
//! println!("Audit queue: {}", config.config().audit().queue);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AuditConfig, CalendarConfig, PermissionConfig, WorkforceConfig};
