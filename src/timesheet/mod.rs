//! Attendance grid logic for the Timesheet Engine.
//!
//! This module contains the cell status cycle, the sparse attendance store,
//! worked-hour totals, the roster-bound grid, and the export selection and
//! dialog session.

mod grid;
mod selection;
mod status_cycle;
mod store;
mod totals;

pub use grid::{CellChange, IndividualTimesheet, Timesheet, TimesheetRow, TimesheetView};
pub use selection::{DialogEntry, DialogView, ExportDialog, SelectionSet};
pub use status_cycle::next_status;
pub use store::AttendanceStore;
pub use totals::{EmployeeTotal, HOURS_PER_WORK_DAY, calculate_total_hours};
