use std::str::FromStr;

use crate::model::employee::{Employee, EmployeeStatus};
use crate::model::role::{Role, Specialization};

/// Filter value meaning "no restriction on this field".
pub const ALL: &str = "all";

/// Employee listing filter. Every criterion is AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Case-insensitive substring over first name, last name and email
    pub query: Option<String>,
    pub role: Option<Role>,
    pub specialization: Option<Specialization>,
    pub status: Option<EmployeeStatus>,
    /// Keep only employees who left instead of only active ones
    pub show_left: bool,
}

impl EmployeeFilter {
    /// Filters in a fixed order: lifecycle partition, free text, role, specialization, status.
    /// Output keeps the order of the input.
    pub fn apply<'a>(&self, employees: impl IntoIterator<Item = &'a Employee>) -> Vec<Employee> {
        let needle = self
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        employees
            .into_iter()
            .filter(|e| e.is_active() != self.show_left)
            .filter(|e| match &needle {
                Some(needle) => matches_text(e, needle),
                None => true,
            })
            .filter(|e| self.role.is_none_or(|role| e.role == role))
            .filter(|e| {
                self.specialization
                    .is_none_or(|specialization| e.specialization == specialization)
            })
            .filter(|e| self.status.is_none_or(|status| e.status() == status))
            .cloned()
            .collect()
    }
}

fn matches_text(employee: &Employee, needle: &str) -> bool {
    employee.first_name.to_lowercase().contains(needle)
        || employee.last_name.to_lowercase().contains(needle)
        || employee.email.to_lowercase().contains(needle)
}

/// Parses an optional categorical filter. Absent, empty and `all` mean no restriction.
pub fn parse_choice<T: FromStr>(raw: Option<&str>) -> Result<Option<T>, T::Err> {
    match raw.map(str::trim) {
        None | Some("") | Some(ALL) => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
