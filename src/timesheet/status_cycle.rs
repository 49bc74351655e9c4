//! Grid cell status transitions.
//!
//! Clicking a cell moves it one step along the fixed cycle
//! `WORK → OFF → SICK → WORK`. There is no terminal state.

use crate::models::AttendanceStatus;

/// Returns the status that follows `current` in the cell cycle.
///
/// A cell without an entry is treated as `WORK`.
///
/// # Examples
///
/// ```
/// use timesheet_engine::models::AttendanceStatus;
/// use timesheet_engine::timesheet::next_status;
///
/// assert_eq!(next_status(None), AttendanceStatus::Off);
/// assert_eq!(next_status(Some(AttendanceStatus::Work)), AttendanceStatus::Off);
/// assert_eq!(next_status(Some(AttendanceStatus::Off)), AttendanceStatus::Sick);
/// assert_eq!(next_status(Some(AttendanceStatus::Sick)), AttendanceStatus::Work);
/// ```
pub fn next_status(current: Option<AttendanceStatus>) -> AttendanceStatus {
    match current.unwrap_or_default() {
        AttendanceStatus::Work => AttendanceStatus::Off,
        AttendanceStatus::Off => AttendanceStatus::Sick,
        AttendanceStatus::Sick => AttendanceStatus::Work,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_status() -> impl Strategy<Value = AttendanceStatus> {
        prop::sample::select(AttendanceStatus::ALL.to_vec())
    }

    #[test]
    fn test_absent_behaves_like_work() {
        assert_eq!(next_status(None), next_status(Some(AttendanceStatus::Work)));
    }

    #[test]
    fn test_every_status_has_a_distinct_successor() {
        let successors: Vec<AttendanceStatus> = AttendanceStatus::ALL
            .into_iter()
            .map(|s| next_status(Some(s)))
            .collect();
        for status in AttendanceStatus::ALL {
            assert_eq!(successors.iter().filter(|s| **s == status).count(), 1);
        }
    }

    proptest! {
        #[test]
        fn cycle_has_period_three(status in any_status()) {
            let once = next_status(Some(status));
            let twice = next_status(Some(once));
            let thrice = next_status(Some(twice));
            prop_assert_eq!(thrice, status);
            prop_assert_ne!(once, status);
            prop_assert_ne!(twice, status);
        }

        #[test]
        fn absent_cycles_back_to_work(current in proptest::option::of(any_status())) {
            let start = current.unwrap_or_default();
            let mut status = next_status(current);
            status = next_status(Some(status));
            status = next_status(Some(status));
            prop_assert_eq!(status, start);
        }
    }
}
