//! Worked-hour totals.
//!
//! Totals are derived from the statuses on every read; nothing is cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AttendanceStatus;

/// Hours credited for one `WORK` day.
pub const HOURS_PER_WORK_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The total for one employee over the timesheet period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotal {
    /// The employee's id.
    pub employee_id: String,
    /// Total worked hours.
    pub total_hours: Decimal,
    /// Number of `WORK` days.
    pub work_days: u32,
    /// Number of `OFF` days.
    pub off_days: u32,
    /// Number of `SICK` days.
    pub sick_days: u32,
}

impl EmployeeTotal {
    /// Tallies a row of statuses for one employee.
    pub fn from_statuses(
        employee_id: impl Into<String>,
        statuses: impl IntoIterator<Item = AttendanceStatus>,
    ) -> Self {
        let mut total = Self {
            employee_id: employee_id.into(),
            total_hours: Decimal::ZERO,
            work_days: 0,
            off_days: 0,
            sick_days: 0,
        };

        for status in statuses {
            match status {
                AttendanceStatus::Work => {
                    total.work_days += 1;
                    total.total_hours += HOURS_PER_WORK_DAY;
                }
                AttendanceStatus::Off => total.off_days += 1,
                AttendanceStatus::Sick => total.sick_days += 1,
            }
        }

        total
    }
}

/// Sums 8 hours for every `WORK` status, 0 for anything else.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use timesheet_engine::models::AttendanceStatus;
/// use timesheet_engine::timesheet::calculate_total_hours;
///
/// let hours = calculate_total_hours([
///     AttendanceStatus::Work,
///     AttendanceStatus::Off,
///     AttendanceStatus::Work,
///     AttendanceStatus::Sick,
/// ]);
/// assert_eq!(hours, Decimal::from(16));
/// ```
pub fn calculate_total_hours(statuses: impl IntoIterator<Item = AttendanceStatus>) -> Decimal {
    statuses
        .into_iter()
        .filter(|s| s.is_work())
        .map(|_| HOURS_PER_WORK_DAY)
        .sum()
}
