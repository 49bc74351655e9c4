//! Export selection and the export dialog session.
//!
//! A [`SelectionSet`] is always a subset of its roster. Selection order is
//! not tracked; enumeration follows roster order.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::error::EngineResult;
use crate::models::{Employee, Roster};

/// The employees chosen for a batch export.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use timesheet_engine::models::{Employee, Roster};
/// use timesheet_engine::timesheet::SelectionSet;
///
/// let roster = Arc::new(Roster::new(vec![
///     Employee::new("emp_001", "Иванов Иван", "Мастер смены"),
///     Employee::new("emp_002", "Петрова Анна", "Лаборант"),
/// ]).unwrap());
///
/// let mut selection = SelectionSet::new(roster);
/// selection.select_all();
/// assert_eq!(selection.len(), 2);
///
/// selection.toggle("emp_001").unwrap();
/// assert!(!selection.contains("emp_001"));
/// ```
#[derive(Debug, Clone)]
pub struct SelectionSet {
    roster: Arc<Roster>,
    selected: HashSet<String>,
}

impl SelectionSet {
    /// Creates an empty selection over a roster.
    pub fn new(roster: Arc<Roster>) -> Self {
        Self {
            roster,
            selected: HashSet::new(),
        }
    }

    /// Selects every roster employee.
    pub fn select_all(&mut self) {
        self.selected = self.roster.ids().map(str::to_string).collect();
    }

    /// Deselects everyone.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Adds the employee if absent, removes it if present.
    ///
    /// Returns whether the employee is selected afterwards. Ids outside the
    /// roster are rejected with `EmployeeNotFound`.
    pub fn toggle(&mut self, employee_id: &str) -> EngineResult<bool> {
        self.roster.require(employee_id)?;

        if self.selected.remove(employee_id) {
            Ok(false)
        } else {
            self.selected.insert(employee_id.to_string());
            Ok(true)
        }
    }

    /// Returns the roster employees matching the search text.
    ///
    /// Case-insensitive substring match on full name or position. Does not
    /// touch the selection.
    pub fn filter<'a>(roster: &'a Roster, search: &str) -> Vec<&'a Employee> {
        roster.search(search)
    }

    /// Returns true if the employee is selected.
    pub fn contains(&self, employee_id: &str) -> bool {
        self.selected.contains(employee_id)
    }

    /// Returns the number of selected employees.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if nobody is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterates the selected employees in roster order.
    pub fn selected_in_roster_order(&self) -> impl Iterator<Item = &Employee> {
        self.roster
            .iter()
            .filter(move |e| self.selected.contains(&e.id))
    }

    /// Returns the roster the selection belongs to.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

/// One roster line as shown in the export dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogEntry {
    /// The employee's id.
    pub id: String,
    /// The employee's full name.
    pub full_name: String,
    /// The employee's position.
    pub position: String,
    /// Whether the employee is selected for export.
    pub selected: bool,
}

/// The visible state of an open export dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogView {
    /// The current search text.
    pub search: String,
    /// Roster entries matching the search, in roster order.
    pub entries: Vec<DialogEntry>,
    /// Number of selected employees, including ones hidden by the search.
    pub selected_count: usize,
    /// Size of the roster.
    pub roster_size: usize,
}

/// An open export dialog session.
///
/// Every session starts with the whole roster selected and is consumed by
/// [`ExportDialog::confirm`].
#[derive(Debug, Clone)]
pub struct ExportDialog {
    selection: SelectionSet,
    search: String,
}

impl ExportDialog {
    /// Opens a dialog with every roster employee selected.
    pub fn open(roster: Arc<Roster>) -> Self {
        let mut selection = SelectionSet::new(roster);
        selection.select_all();
        Self {
            selection,
            search: String::new(),
        }
    }

    /// Replaces the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Returns the current selection for mutation.
    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    /// Renders the filtered roster with selection flags.
    pub fn view(&self) -> DialogView {
        let roster = self.selection.roster();
        let entries = SelectionSet::filter(roster, &self.search)
            .into_iter()
            .map(|e| DialogEntry {
                id: e.id.clone(),
                full_name: e.full_name.clone(),
                position: e.position.clone(),
                selected: self.selection.contains(&e.id),
            })
            .collect();

        DialogView {
            search: self.search.clone(),
            entries,
            selected_count: self.selection.len(),
            roster_size: roster.len(),
        }
    }

    /// Closes the dialog, handing over the final selection.
    pub fn confirm(self) -> SelectionSet {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use proptest::prelude::*;

    fn roster() -> Arc<Roster> {
        Arc::new(
            Roster::new(vec![
                Employee::new("emp_001", "Иванов Иван", "Мастер смены"),
                Employee::new("emp_002", "Петрова Анна", "Инженер-технолог"),
                Employee::new("emp_003", "Сидоров Олег", "Оператор"),
                Employee::new("emp_004", "Smith John", "Engineer"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_select_all_then_clear_is_empty() {
        let mut selection = SelectionSet::new(roster());
        selection.select_all();
        assert_eq!(selection.len(), 4);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_unknown_id_is_rejected() {
        let mut selection = SelectionSet::new(roster());
        match selection.toggle("emp_999") {
            Err(EngineError::EmployeeNotFound { employee_id }) => {
                assert_eq!(employee_id, "emp_999");
            }
            _ => panic!("Expected EmployeeNotFound error"),
        }
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_reports_new_membership() {
        let mut selection = SelectionSet::new(roster());
        assert!(selection.toggle("emp_002").unwrap());
        assert!(!selection.toggle("emp_002").unwrap());
    }

    #[test]
    fn test_enumeration_follows_roster_not_toggle_order() {
        let mut selection = SelectionSet::new(roster());
        selection.toggle("emp_003").unwrap();
        selection.toggle("emp_001").unwrap();

        let ids: Vec<&str> = selection
            .selected_in_roster_order()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["emp_001", "emp_003"]);
    }

    #[test]
    fn test_filter_empty_returns_roster() {
        let roster = roster();
        let all: Vec<&str> = SelectionSet::filter(&roster, "")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(all, vec!["emp_001", "emp_002", "emp_003", "emp_004"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_on_name_or_position() {
        let roster = roster();
        let hits = |s: &str| -> Vec<String> {
            SelectionSet::filter(&roster, s)
                .iter()
                .map(|e| e.id.clone())
                .collect()
        };

        assert_eq!(hits("ENGINEER"), vec!["emp_004"]);
        assert_eq!(hits("smith"), vec!["emp_004"]);
        assert_eq!(hits("ИНЖЕНЕР"), vec!["emp_002"]);
        assert_eq!(hits("олег"), vec!["emp_003"]);
    }

    #[test]
    fn test_dialog_opens_with_everyone_selected() {
        let dialog = ExportDialog::open(roster());
        let view = dialog.view();
        assert_eq!(view.selected_count, 4);
        assert_eq!(view.roster_size, 4);
        assert!(view.entries.iter().all(|e| e.selected));
    }

    #[test]
    fn test_dialog_search_hides_entries_but_keeps_selection() {
        let mut dialog = ExportDialog::open(roster());
        dialog.selection_mut().toggle("emp_001").unwrap();
        dialog.set_search("петрова");

        let view = dialog.view();
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].id, "emp_002");
        assert!(view.entries[0].selected);
        assert_eq!(view.selected_count, 3);

        let selection = dialog.confirm();
        assert!(!selection.contains("emp_001"));
        assert!(selection.contains("emp_004"));
    }

    proptest! {
        #[test]
        fn toggle_twice_restores_selection(
            initial in proptest::collection::vec(any::<bool>(), 4),
            index in 0usize..4,
        ) {
            let roster = roster();
            let ids: Vec<String> = roster.ids().map(str::to_string).collect();
            let mut selection = SelectionSet::new(roster);
            for (id, on) in ids.iter().zip(&initial) {
                if *on {
                    selection.toggle(id).unwrap();
                }
            }
            let before: Vec<bool> = ids.iter().map(|id| selection.contains(id)).collect();

            selection.toggle(&ids[index]).unwrap();
            selection.toggle(&ids[index]).unwrap();

            let after: Vec<bool> = ids.iter().map(|id| selection.contains(id)).collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn filter_never_changes_selection(search in "\\PC{0,6}") {
            let mut dialog = ExportDialog::open(roster());
            dialog.selection_mut().toggle("emp_002").unwrap();
            dialog.set_search(search);
            let _ = dialog.view();
            prop_assert_eq!(dialog.selection().len(), 3);
            prop_assert!(!dialog.selection().contains("emp_002"));
        }
    }
}
