//! Configuration types for the Timesheet Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::export::{DEFAULT_ITEM_LATENCY, DEFAULT_SUCCESS_DISPLAY};
use crate::models::{Roster, TimesheetPeriod};

/// Export timing and output settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportSettings {
    /// Simulated per-employee generation latency, in milliseconds.
    #[serde(default = "default_item_latency_ms")]
    pub item_latency_ms: u64,
    /// How long the success notification stays before returning to idle, in milliseconds.
    #[serde(default = "default_success_display_ms")]
    pub success_display_ms: u64,
    /// Directory to write JSON timesheets into; simulated generation when absent.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_item_latency_ms() -> u64 {
    DEFAULT_ITEM_LATENCY.as_millis() as u64
}

fn default_success_display_ms() -> u64 {
    DEFAULT_SUCCESS_DISPLAY.as_millis() as u64
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            item_latency_ms: default_item_latency_ms(),
            success_display_ms: default_success_display_ms(),
            output_dir: None,
        }
    }
}

impl ExportSettings {
    /// Returns the per-item latency.
    pub fn item_latency(&self) -> Duration {
        Duration::from_millis(self.item_latency_ms)
    }

    /// Returns the success display duration.
    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }
}

/// AI service settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssistantSettings {
    /// Base URL of the generative API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for chat and short texts.
    #[serde(default = "default_fast_model")]
    pub fast_model: String,
    /// Model used for structured analysis.
    #[serde(default = "default_pro_model")]
    pub pro_model: String,
    /// Sampling temperature for chat.
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_fast_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_pro_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_chat_temperature() -> f32 {
    0.7
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fast_model: default_fast_model(),
            pro_model: default_pro_model(),
            chat_temperature: default_chat_temperature(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AssistantSettings {
    /// Reads the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Contents of `settings.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// The month the timesheet covers.
    pub period: TimesheetPeriod,
    /// Export settings.
    #[serde(default)]
    pub export: ExportSettings,
    /// AI service settings.
    #[serde(default)]
    pub assistant: AssistantSettings,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: Settings,
    roster: Roster,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(settings: Settings, roster: Roster) -> Self {
        Self { settings, roster }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the timesheet period.
    pub fn period(&self) -> TimesheetPeriod {
        self.settings.period
    }

    /// Returns the export settings.
    pub fn export(&self) -> &ExportSettings {
        &self.settings.export
    }

    /// Returns the AI service settings.
    pub fn assistant(&self) -> &AssistantSettings {
        &self.settings.assistant
    }
}
