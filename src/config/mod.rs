//! Configuration loading and management for the Timesheet Engine.
//!
//! This module loads the timesheet period, export settings, AI service
//! settings and the employee roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} employees", config.roster().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AssistantSettings, EngineConfig, ExportSettings, Settings};
