use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::{Employee, EmployeeStatus};
use crate::model::project::{Project, ProjectStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "totalEmployees": 3,
    "activeProjects": 2,
    "onSiteToday": 0,
    "pendingTasks": 1
}))]
pub struct DashboardStats {
    /// Active employees
    pub total_employees: usize,
    /// Projects with status `active`
    pub active_projects: usize,
    /// Attendance records dated today with status `present`
    pub on_site_today: usize,
    /// Active employees with status `available`. The name is kept for existing clients.
    pub pending_tasks: usize,
}

impl DashboardStats {
    /// Full scan over the three collections. `today` is a calendar day in server local time.
    pub fn compute<'a>(
        employees: impl IntoIterator<Item = &'a Employee>,
        projects: impl IntoIterator<Item = &'a Project>,
        attendance: impl IntoIterator<Item = &'a Attendance>,
        today: NaiveDate,
    ) -> Self {
        let mut stats = DashboardStats::default();

        for employee in employees.into_iter().filter(|e| e.is_active()) {
            stats.total_employees += 1;
            if employee.status() == EmployeeStatus::Available {
                stats.pending_tasks += 1;
            }
        }

        stats.active_projects = projects
            .into_iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .count();

        stats.on_site_today = attendance
            .into_iter()
            .filter(|a| a.status == AttendanceStatus::Present && a.day() == today)
            .count();

        stats
    }
}
