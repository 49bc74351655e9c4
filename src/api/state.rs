//! Application state for the Timesheet Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::assistant::Assistant;
use crate::config::ConfigLoader;
use crate::export::ExportWorkflow;
use crate::timesheet::{ExportDialog, Timesheet};

/// Shared application state.
///
/// Holds the session's attendance grid, the export dialog (when open),
/// the export workflow and the AI assistant.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    timesheet: Arc<RwLock<Timesheet>>,
    dialog: Arc<Mutex<Option<ExportDialog>>>,
    workflow: ExportWorkflow,
    assistant: Assistant,
}

impl AppState {
    /// Creates the application state with an empty grid over the configured roster.
    pub fn new(config: ConfigLoader, workflow: ExportWorkflow, assistant: Assistant) -> Self {
        let timesheet = Timesheet::new(Arc::new(config.roster().clone()), config.period());
        Self {
            config: Arc::new(config),
            timesheet: Arc::new(RwLock::new(timesheet)),
            dialog: Arc::new(Mutex::new(None)),
            workflow,
            assistant,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the attendance grid.
    pub fn timesheet(&self) -> &RwLock<Timesheet> {
        &self.timesheet
    }

    /// Returns the export dialog slot; `None` while the dialog is closed.
    pub fn dialog(&self) -> &Mutex<Option<ExportDialog>> {
        &self.dialog
    }

    /// Returns the export workflow.
    pub fn workflow(&self) -> &ExportWorkflow {
        &self.workflow
    }

    /// Returns the AI assistant.
    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }
}
