//! Core data models for the Timesheet Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod analysis;
mod attendance;
mod contractor;
mod employee;
mod period;
mod task;

pub use analysis::{Complexity, DocumentAnalysis, RiskPrediction, RiskStatus, TaskAnalysis};
pub use attendance::AttendanceStatus;
pub use contractor::{Advance, ContractDocument, Contractor, Vehicle, Worker};
pub use employee::{Employee, Roster};
pub use period::TimesheetPeriod;
pub use task::{ChatMessage, ChatRole, Task, WritingKind};
