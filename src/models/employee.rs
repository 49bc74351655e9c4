//! Employee and roster models.
//!
//! This module defines the [`Employee`] record and the ordered [`Roster`]
//! that every timesheet, selection and export run is keyed against.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents an employee listed on the timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name as printed on the timesheet.
    pub full_name: String,
    /// The employee's position (e.g., "Инженер-технолог").
    pub position: String,
}

impl Employee {
    /// Creates a new employee record.
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            position: position.into(),
        }
    }

    /// Returns true if the lowercased search text occurs in the full name or position.
    ///
    /// An empty search matches every employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::Employee;
    ///
    /// let employee = Employee::new("emp_001", "Иванов Иван", "Мастер смены");
    /// assert!(employee.matches("иванов"));
    /// assert!(employee.matches("СМЕНЫ"));
    /// assert!(!employee.matches("бухгалтер"));
    /// ```
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        self.full_name.to_lowercase().contains(&needle)
            || self.position.to_lowercase().contains(&needle)
    }
}

/// The fixed, ordered list of employees known to the session.
///
/// Enumeration order is significant: totals, filters and export runs all
/// follow it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    /// Builds a roster, rejecting duplicate employee ids.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::{Employee, Roster};
    ///
    /// let roster = Roster::new(vec![
    ///     Employee::new("emp_001", "Иванов Иван", "Мастер смены"),
    ///     Employee::new("emp_002", "Петрова Анна", "Лаборант"),
    /// ])
    /// .unwrap();
    /// assert_eq!(roster.len(), 2);
    /// assert!(roster.contains("emp_002"));
    /// ```
    pub fn new(employees: Vec<Employee>) -> EngineResult<Self> {
        for (index, employee) in employees.iter().enumerate() {
            if employees[..index].iter().any(|e| e.id == employee.id) {
                return Err(EngineError::DuplicateEmployee {
                    employee_id: employee.id.clone(),
                });
            }
        }
        Ok(Self { employees })
    }

    /// Returns the employee with the given id.
    pub fn get(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == employee_id)
    }

    /// Returns the employee with the given id, or `EmployeeNotFound`.
    pub fn require(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Returns true if the id belongs to a roster employee.
    pub fn contains(&self, employee_id: &str) -> bool {
        self.get(employee_id).is_some()
    }

    /// Iterates employees in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter()
    }

    /// Iterates employee ids in roster order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.employees.iter().map(|e| e.id.as_str())
    }

    /// Returns the number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the roster has no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Returns the employees matching the search text, in roster order.
    pub fn search(&self, search: &str) -> Vec<&Employee> {
        self.employees.iter().filter(|e| e.matches(search)).collect()
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let employees = Vec::<Employee>::deserialize(deserializer)?;
        Roster::new(employees).map_err(serde::de::Error::custom)
    }
}
