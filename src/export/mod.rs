//! Batch export of individual timesheets.
//!
//! This module contains the export state machine and the per-employee
//! document generators it drives.

mod generator;
mod workflow;

pub use generator::{
    DEFAULT_ITEM_LATENCY, GeneratedDocument, JsonFileGenerator, SheetGenerator,
    SimulatedGenerator, document_file_name,
};
pub use workflow::{
    DEFAULT_SUCCESS_DISPLAY, ExportFailure, ExportProgress, ExportReport, ExportRun,
    ExportWorkflow,
};
