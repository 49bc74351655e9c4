//! Attendance status codes.
//!
//! Every cell of the attendance grid holds one of three statuses. A cell
//! without an explicit entry is a working day.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The status of one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// A regular eight-hour working day. Implicit when no entry exists.
    #[default]
    Work,
    /// Day off.
    Off,
    /// Sick leave.
    Sick,
}

impl AttendanceStatus {
    /// All statuses in cycle order.
    pub const ALL: [AttendanceStatus; 3] = [
        AttendanceStatus::Work,
        AttendanceStatus::Off,
        AttendanceStatus::Sick,
    ];

    /// Returns the single-character code shown in the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::AttendanceStatus;
    ///
    /// assert_eq!(AttendanceStatus::Work.code(), "8");
    /// assert_eq!(AttendanceStatus::Off.code(), "В");
    /// assert_eq!(AttendanceStatus::Sick.code(), "Б");
    /// ```
    pub fn code(self) -> &'static str {
        match self {
            AttendanceStatus::Work => "8",
            AttendanceStatus::Off => "В",
            AttendanceStatus::Sick => "Б",
        }
    }

    /// Parses a grid code back into a status.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Returns true if the day counts towards worked hours.
    pub fn is_work(self) -> bool {
        self == AttendanceStatus::Work
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
