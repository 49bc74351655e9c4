//! Error types for the Timesheet Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the attendance grid, the
//! export workflow and the AI service boundary.

use thiserror::Error;

/// The main error type for the Timesheet Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/roster.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/roster.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The timesheet period does not name a real calendar month.
    #[error("Invalid timesheet period {year}-{month}")]
    InvalidPeriod {
        /// The configured year.
        year: i32,
        /// The configured month (1-12).
        month: u32,
    },

    /// The roster lists the same employee id more than once.
    #[error("Duplicate employee id in roster: {employee_id}")]
    DuplicateEmployee {
        /// The repeated id.
        employee_id: String,
    },

    /// An employee id is not part of the roster.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that was not found.
        employee_id: String,
    },

    /// A day outside the timesheet period was addressed.
    #[error("Day {day} is outside the period (1..={days_in_month})")]
    DayOutOfRange {
        /// The requested day of month.
        day: u32,
        /// The number of days in the period.
        days_in_month: u32,
    },

    /// No export dialog is currently open.
    #[error("No export dialog is open")]
    DialogNotOpen,

    /// An export was requested while another one has not returned to idle.
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Generating one individual timesheet failed.
    #[error("Failed to generate timesheet for '{employee_id}': {message}")]
    DocumentGeneration {
        /// The employee whose document failed.
        employee_id: String,
        /// A description of the failure.
        message: String,
    },

    /// An attachment's payload is not valid base64.
    #[error("Invalid attachment '{mime_type}': {message}")]
    InvalidAttachment {
        /// The declared content type.
        mime_type: String,
        /// A description of the decoding failure.
        message: String,
    },

    /// The AI service could not be reached or rejected the request.
    #[error("AI request failed: {message}")]
    AiRequest {
        /// A description of the transport or status failure.
        message: String,
    },

    /// The AI service answered with a payload that does not match the expected shape.
    #[error("AI response could not be parsed: {message}")]
    AiResponseParse {
        /// A description of the parse failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/settings.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_period_displays_year_and_month() {
        let error = EngineError::InvalidPeriod {
            year: 2023,
            month: 13,
        };
        assert_eq!(error.to_string(), "Invalid timesheet period 2023-13");
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            employee_id: "emp_404".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: emp_404");
    }

    #[test]
    fn test_day_out_of_range_displays_bounds() {
        let error = EngineError::DayOutOfRange {
            day: 31,
            days_in_month: 30,
        };
        assert_eq!(
            error.to_string(),
            "Day 31 is outside the period (1..=30)"
        );
    }

    #[test]
    fn test_document_generation_displays_employee_and_message() {
        let error = EngineError::DocumentGeneration {
            employee_id: "emp_001".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to generate timesheet for 'emp_001': disk full"
        );
    }

    #[test]
    fn test_export_in_progress_message() {
        assert_eq!(
            EngineError::ExportInProgress.to_string(),
            "An export is already in progress"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: "x".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
