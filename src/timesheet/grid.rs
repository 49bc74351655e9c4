//! The attendance grid for one roster and one month.
//!
//! [`Timesheet`] owns the roster, the period and the [`AttendanceStore`], and
//! is the only place cell addresses are validated. Every successful cell
//! change is broadcast to subscribers.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AttendanceStatus, Employee, Roster, TimesheetPeriod};

use super::selection::SelectionSet;
use super::store::AttendanceStore;
use super::totals::EmployeeTotal;

/// Capacity of the cell-change broadcast channel.
const CELL_CHANGE_CAPACITY: usize = 256;

/// Notification published after a cell changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    /// The employee whose cell changed.
    pub employee_id: String,
    /// The day of month.
    pub day: u32,
    /// The new status.
    pub status: AttendanceStatus,
}

/// One rendered grid row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetRow {
    /// The employee.
    pub employee: Employee,
    /// Statuses for day 1 through the last day of the month.
    pub statuses: Vec<AttendanceStatus>,
    /// Total worked hours for the month.
    pub total_hours: Decimal,
}

/// The whole rendered grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetView {
    /// The covered month.
    pub period: TimesheetPeriod,
    /// Day numbers shown as columns.
    pub days: Vec<u32>,
    /// Rows in roster order.
    pub rows: Vec<TimesheetRow>,
}

/// The per-employee artifact produced by a batch export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualTimesheet {
    /// The employee the sheet belongs to.
    pub employee: Employee,
    /// The covered month.
    pub period: TimesheetPeriod,
    /// Statuses for day 1 through the last day of the month.
    pub statuses: Vec<AttendanceStatus>,
    /// Worked-hour tally.
    pub totals: EmployeeTotal,
}

/// The attendance grid of a roster for one month.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rust_decimal::Decimal;
/// use timesheet_engine::models::{AttendanceStatus, Employee, Roster, TimesheetPeriod};
/// use timesheet_engine::timesheet::Timesheet;
///
/// let roster = Arc::new(Roster::new(vec![
///     Employee::new("emp_001", "Иванов Иван", "Мастер смены"),
/// ]).unwrap());
/// let mut sheet = Timesheet::new(roster, TimesheetPeriod::new(2023, 11).unwrap());
///
/// assert_eq!(sheet.total_hours("emp_001").unwrap(), Decimal::from(240));
/// assert_eq!(sheet.record_status("emp_001", 4).unwrap(), AttendanceStatus::Off);
/// assert_eq!(sheet.total_hours("emp_001").unwrap(), Decimal::from(232));
/// assert!(sheet.record_status("emp_001", 31).is_err());
/// ```
#[derive(Debug)]
pub struct Timesheet {
    roster: Arc<Roster>,
    period: TimesheetPeriod,
    store: AttendanceStore,
    changes: broadcast::Sender<CellChange>,
}

impl Timesheet {
    /// Creates an all-`WORK` grid.
    pub fn new(roster: Arc<Roster>, period: TimesheetPeriod) -> Self {
        let (changes, _) = broadcast::channel(CELL_CHANGE_CAPACITY);
        Self {
            roster,
            period,
            store: AttendanceStore::new(),
            changes,
        }
    }

    /// Returns the roster.
    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    /// Returns the covered month.
    pub fn period(&self) -> TimesheetPeriod {
        self.period
    }

    /// Subscribes to cell-change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CellChange> {
        self.changes.subscribe()
    }

    /// Advances one cell along the status cycle.
    ///
    /// Returns `EmployeeNotFound` or `DayOutOfRange` for cells outside the
    /// grid; the store is not touched in that case.
    pub fn record_status(&mut self, employee_id: &str, day: u32) -> EngineResult<AttendanceStatus> {
        self.roster.require(employee_id)?;
        self.period.require_day(day)?;

        let status = self.store.record_status(employee_id, day);
        debug!(employee_id, day, status = %status, "Cell status changed");

        // No subscribers is not an error.
        let _ = self.changes.send(CellChange {
            employee_id: employee_id.to_string(),
            day,
            status,
        });

        Ok(status)
    }

    /// Returns the status of one cell.
    pub fn status(&self, employee_id: &str, day: u32) -> EngineResult<AttendanceStatus> {
        self.roster.require(employee_id)?;
        self.period.require_day(day)?;
        Ok(self.store.status(employee_id, day))
    }

    /// Returns the worked hours of one employee over the whole month.
    pub fn total_hours(&self, employee_id: &str) -> EngineResult<Decimal> {
        self.roster.require(employee_id)?;
        Ok(self.store.total_hours(employee_id, self.period.days()))
    }

    /// Returns the tally of every employee, in roster order.
    pub fn totals(&self) -> Vec<EmployeeTotal> {
        self.roster
            .iter()
            .map(|e| self.employee_total(&e.id))
            .collect()
    }

    /// Returns one rendered row.
    pub fn row(&self, employee_id: &str) -> EngineResult<TimesheetRow> {
        let employee = self.roster.require(employee_id)?;
        Ok(self.build_row(employee))
    }

    /// Renders the whole grid.
    pub fn view(&self) -> TimesheetView {
        TimesheetView {
            period: self.period,
            days: self.period.days().collect(),
            rows: self.roster.iter().map(|e| self.build_row(e)).collect(),
        }
    }

    /// Snapshots one individual timesheet per selected employee, in roster order.
    pub fn individual_sheets(&self, selection: &SelectionSet) -> Vec<IndividualTimesheet> {
        selection
            .selected_in_roster_order()
            .map(|employee| IndividualTimesheet {
                employee: employee.clone(),
                period: self.period,
                statuses: self.store.row(&employee.id, self.period.days()),
                totals: self.employee_total(&employee.id),
            })
            .collect()
    }

    /// Resets every cell to `WORK`.
    pub fn reset(&mut self) {
        self.store.clear();
    }

    fn employee_total(&self, employee_id: &str) -> EmployeeTotal {
        EmployeeTotal::from_statuses(employee_id, self.store.row(employee_id, self.period.days()))
    }

    fn build_row(&self, employee: &Employee) -> TimesheetRow {
        TimesheetRow {
            employee: employee.clone(),
            statuses: self.store.row(&employee.id, self.period.days()),
            total_hours: self.store.total_hours(&employee.id, self.period.days()),
        }
    }
}
