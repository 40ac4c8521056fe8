//! Storage abstraction for employees, projects and attendance.
//!
//! Handlers only talk to [`Storage`]; [`MemStorage`] keeps everything in process memory
//! and loses it on restart.

pub mod memory;
pub mod sample;
pub mod search;
pub mod table;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreResult;
use crate::model::attendance::{Attendance, AttendancePatch, NewAttendance};
use crate::model::dashboard::DashboardStats;
use crate::model::employee::{Employee, EmployeePatch, NewEmployee};
use crate::model::project::{NewProject, Project, ProjectPatch};

pub use memory::MemStorage;
pub use search::EmployeeFilter;

#[async_trait]
pub trait Storage: Send + Sync {
    // Employees
    async fn get_employee(&self, id: &str) -> Option<Employee>;
    /// Case-insensitive lookup
    async fn get_employee_by_email(&self, email: &str) -> Option<Employee>;
    async fn get_all_employees(&self) -> Vec<Employee>;
    async fn get_active_employees(&self) -> Vec<Employee>;
    async fn get_left_employees(&self) -> Vec<Employee>;
    /// Fails with `EmailTaken` when another employee already uses the email.
    async fn create_employee(&self, new: NewEmployee) -> StoreResult<Employee>;
    async fn update_employee(&self, id: &str, patch: EmployeePatch) -> StoreResult<Employee>;
    /// Hard delete. Returns whether a record existed.
    async fn delete_employee(&self, id: &str) -> bool;
    async fn soft_delete_employee(&self, id: &str) -> StoreResult<Employee>;
    async fn restore_employee(&self, id: &str) -> StoreResult<Employee>;
    async fn search_employees(&self, filter: &EmployeeFilter) -> Vec<Employee>;

    // Projects
    async fn get_project(&self, id: &str) -> Option<Project>;
    async fn get_all_projects(&self) -> Vec<Project>;
    async fn create_project(&self, new: NewProject) -> Project;
    async fn update_project(&self, id: &str, patch: ProjectPatch) -> StoreResult<Project>;
    async fn delete_project(&self, id: &str) -> bool;

    // Attendance
    async fn get_attendance(&self, id: &str) -> Option<Attendance>;
    /// Records of one employee, optionally restricted to a calendar day.
    async fn get_attendance_by_employee(
        &self,
        employee_id: &str,
        date: Option<NaiveDate>,
    ) -> Vec<Attendance>;
    async fn get_all_attendance(&self) -> Vec<Attendance>;
    async fn create_attendance(&self, new: NewAttendance) -> Attendance;
    async fn update_attendance(&self, id: &str, patch: AttendancePatch)
    -> StoreResult<Attendance>;

    async fn dashboard_stats(&self) -> DashboardStats;
}
