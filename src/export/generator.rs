//! Per-employee document generation.
//!
//! The export workflow calls one [`SheetGenerator::generate`] per selected
//! employee. Two generators ship with the engine: a simulated one with a
//! fixed latency, and one that writes each sheet as a JSON file.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::timesheet::IndividualTimesheet;

/// Per-item latency of the simulated generator.
pub const DEFAULT_ITEM_LATENCY: Duration = Duration::from_millis(800);

/// A generated individual timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// The employee the document belongs to.
    pub employee_id: String,
    /// The document's file name.
    pub file_name: String,
    /// Where the document was written, if it was written to disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Produces one output document per individual timesheet.
#[async_trait]
pub trait SheetGenerator: Send + Sync {
    /// Generates the document for one employee.
    async fn generate(&self, sheet: &IndividualTimesheet) -> EngineResult<GeneratedDocument>;
}

/// Returns the file name used for an employee's sheet, e.g. `emp_001_2023-11.json`.
pub fn document_file_name(sheet: &IndividualTimesheet, extension: &str) -> String {
    format!("{}_{}.{}", sheet.employee.id, sheet.period.label(), extension)
}

/// Simulates document generation by waiting a fixed latency per item.
#[derive(Debug, Clone)]
pub struct SimulatedGenerator {
    latency: Duration,
}

impl SimulatedGenerator {
    /// Creates a generator that waits `latency` per document.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_LATENCY)
    }
}

#[async_trait]
impl SheetGenerator for SimulatedGenerator {
    async fn generate(&self, sheet: &IndividualTimesheet) -> EngineResult<GeneratedDocument> {
        tokio::time::sleep(self.latency).await;
        Ok(GeneratedDocument {
            employee_id: sheet.employee.id.clone(),
            file_name: document_file_name(sheet, "pdf"),
            path: None,
        })
    }
}

/// Writes each individual timesheet as pretty-printed JSON into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileGenerator {
    output_dir: PathBuf,
}

impl JsonFileGenerator {
    /// Creates a generator writing into `output_dir`, created on first use.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl SheetGenerator for JsonFileGenerator {
    async fn generate(&self, sheet: &IndividualTimesheet) -> EngineResult<GeneratedDocument> {
        let employee_id = sheet.employee.id.clone();
        let failed = |message: String| EngineError::DocumentGeneration {
            employee_id: employee_id.clone(),
            message,
        };

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| failed(e.to_string()))?;

        let file_name = document_file_name(sheet, "json");
        let path = self.output_dir.join(&file_name);
        let body = serde_json::to_vec_pretty(sheet).map_err(|e| failed(e.to_string()))?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| failed(e.to_string()))?;

        debug!(employee_id = %employee_id, path = %path.display(), "Timesheet written");

        Ok(GeneratedDocument {
            employee_id,
            file_name,
            path: Some(path),
        })
    }
}
