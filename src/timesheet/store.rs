//! In-memory attendance storage.
//!
//! The store is sparse: only non-working days are kept. A cell without an
//! entry reads as [`AttendanceStatus::Work`], and cycling a cell back to
//! `WORK` removes its entry.

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use rust_decimal::Decimal;

use crate::models::AttendanceStatus;

use super::status_cycle::next_status;
use super::totals::calculate_total_hours;

/// Mapping of employee id → day of month → status.
///
/// The store does not know the roster or the period; callers only address
/// cells they rendered. [`Timesheet`](super::Timesheet) performs that
/// validation before delegating here.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::AttendanceStatus;
/// use timesheet_engine::timesheet::AttendanceStore;
///
/// let mut store = AttendanceStore::new();
/// assert_eq!(store.status("emp_001", 3), AttendanceStatus::Work);
///
/// assert_eq!(store.record_status("emp_001", 3), AttendanceStatus::Off);
/// assert_eq!(store.record_status("emp_001", 3), AttendanceStatus::Sick);
/// assert_eq!(store.record_status("emp_001", 3), AttendanceStatus::Work);
/// assert_eq!(store.explicit_entries(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttendanceStore {
    entries: HashMap<String, BTreeMap<u32, AttendanceStatus>>,
}

impl AttendanceStore {
    /// Creates an empty store where every cell reads as `WORK`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status of one cell, `WORK` when absent.
    pub fn status(&self, employee_id: &str, day: u32) -> AttendanceStatus {
        self.entries
            .get(employee_id)
            .and_then(|days| days.get(&day))
            .copied()
            .unwrap_or_default()
    }

    /// Advances one cell along the status cycle and returns its new status.
    ///
    /// Mutates exactly one `(employee_id, day)` pair.
    pub fn record_status(&mut self, employee_id: &str, day: u32) -> AttendanceStatus {
        let current = self
            .entries
            .get(employee_id)
            .and_then(|days| days.get(&day))
            .copied();
        let next = next_status(current);

        if next.is_work() {
            if let Some(days) = self.entries.get_mut(employee_id) {
                days.remove(&day);
                if days.is_empty() {
                    self.entries.remove(employee_id);
                }
            }
        } else {
            self.entries
                .entry(employee_id.to_string())
                .or_default()
                .insert(day, next);
        }

        next
    }

    /// Sums worked hours for one employee over a day range.
    pub fn total_hours(&self, employee_id: &str, days: RangeInclusive<u32>) -> Decimal {
        calculate_total_hours(days.map(|day| self.status(employee_id, day)))
    }

    /// Returns the statuses of one employee for every day in the range.
    pub fn row(&self, employee_id: &str, days: RangeInclusive<u32>) -> Vec<AttendanceStatus> {
        days.map(|day| self.status(employee_id, day)).collect()
    }

    /// Returns the number of stored non-working cells.
    pub fn explicit_entries(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Discards every entry, resetting the grid to all `WORK`.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_untouched_employee_works_every_day() {
        let store = AttendanceStore::new();
        assert_eq!(store.total_hours("emp_001", 1..=30), dec(240));
    }

    #[test]
    fn test_record_status_touches_only_one_cell() {
        let mut store = AttendanceStore::new();
        store.record_status("emp_001", 5);

        assert_eq!(store.status("emp_001", 5), AttendanceStatus::Off);
        assert_eq!(store.status("emp_001", 4), AttendanceStatus::Work);
        assert_eq!(store.status("emp_001", 6), AttendanceStatus::Work);
        assert_eq!(store.status("emp_002", 5), AttendanceStatus::Work);
        assert_eq!(store.explicit_entries(), 1);
    }

    #[test]
    fn test_each_non_working_day_subtracts_eight_hours() {
        let mut store = AttendanceStore::new();
        store.record_status("emp_001", 1); // OFF
        store.record_status("emp_001", 2); // OFF
        store.record_status("emp_001", 2); // SICK

        assert_eq!(store.total_hours("emp_001", 1..=30), dec(240 - 16));
    }

    #[test]
    fn test_days_outside_range_do_not_count() {
        let mut store = AttendanceStore::new();
        store.record_status("emp_001", 20);

        assert_eq!(store.total_hours("emp_001", 1..=10), dec(80));
    }

    #[test]
    fn test_cycling_back_to_work_keeps_store_sparse() {
        let mut store = AttendanceStore::new();
        for _ in 0..3 {
            store.record_status("emp_001", 7);
        }
        assert_eq!(store.status("emp_001", 7), AttendanceStatus::Work);
        assert_eq!(store.explicit_entries(), 0);
    }

    #[test]
    fn test_row_reports_each_day() {
        let mut store = AttendanceStore::new();
        store.record_status("emp_001", 2);
        assert_eq!(
            store.row("emp_001", 1..=3),
            vec![
                AttendanceStatus::Work,
                AttendanceStatus::Off,
                AttendanceStatus::Work
            ]
        );
    }

    #[test]
    fn test_clear_resets_grid() {
        let mut store = AttendanceStore::new();
        store.record_status("emp_001", 1);
        store.record_status("emp_002", 1);
        store.clear();
        assert_eq!(store.explicit_entries(), 0);
        assert_eq!(store.total_hours("emp_001", 1..=1), dec(8));
    }
}
