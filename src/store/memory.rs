use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::attendance::{Attendance, AttendancePatch, NewAttendance};
use crate::model::dashboard::DashboardStats;
use crate::model::employee::{Employee, EmployeePatch, NewEmployee, normalize_email};
use crate::model::project::{NewProject, Project, ProjectPatch};
use crate::store::search::EmployeeFilter;
use crate::store::table::{Keyed, Table};
use crate::store::{Storage, sample};
use crate::utils::email_filter::EmailFilter;

impl Keyed for Employee {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Project {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Attendance {
    fn key(&self) -> &str {
        &self.id
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// In-memory store. Each collection sits behind its own lock, so single operations are
/// atomic and concurrent updates of one record are last-write-wins.
/// Scans return records in insertion order.
#[derive(Default)]
pub struct MemStorage {
    employees: RwLock<Table<Employee>>,
    projects: RwLock<Table<Project>>,
    attendance: RwLock<Table<Attendance>>,
    emails: EmailFilter,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo employees and projects.
    pub fn with_sample_data() -> Self {
        let storage = Self::new();

        {
            let mut employees = write(&storage.employees);
            let sample_employees = sample::employees();
            storage
                .emails
                .insert_batch(sample_employees.iter().map(|e| e.email.as_str()));
            for employee in sample_employees {
                employees.insert(employee);
            }

            let mut projects = write(&storage.projects);
            for project in sample::projects() {
                projects.insert(project);
            }

            info!(
                employees = employees.len(),
                projects = projects.len(),
                "Sample data loaded"
            );
        }

        storage
    }

    /// Caller must hold the employees lock so the check and the write are atomic.
    fn email_in_use(&self, employees: &Table<Employee>, email: &str, except_id: Option<&str>) -> bool {
        let email = normalize_email(email);

        // Fast negative
        if !self.emails.might_exist(&email) {
            return false;
        }

        employees
            .values()
            .any(|e| normalize_email(&e.email) == email && Some(e.id.as_str()) != except_id)
    }

    fn transition(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Employee) -> bool,
    ) -> StoreResult<(Employee, bool)> {
        let mut employees = write(&self.employees);
        let mut employee = employees
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Employee", id))?;

        let changed = apply(&mut employee);
        if changed {
            employees.insert(employee.clone());
        }
        Ok((employee, changed))
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_employee(&self, id: &str) -> Option<Employee> {
        read(&self.employees).get(id).cloned()
    }

    async fn get_employee_by_email(&self, email: &str) -> Option<Employee> {
        let email = normalize_email(email);
        if !self.emails.might_exist(&email) {
            return None;
        }

        read(&self.employees)
            .values()
            .find(|e| normalize_email(&e.email) == email)
            .cloned()
    }

    async fn get_all_employees(&self) -> Vec<Employee> {
        read(&self.employees).values().cloned().collect()
    }

    async fn get_active_employees(&self) -> Vec<Employee> {
        read(&self.employees)
            .values()
            .filter(|e| e.is_active())
            .cloned()
            .collect()
    }

    async fn get_left_employees(&self) -> Vec<Employee> {
        read(&self.employees)
            .values()
            .filter(|e| !e.is_active())
            .cloned()
            .collect()
    }

    async fn create_employee(&self, new: NewEmployee) -> StoreResult<Employee> {
        let mut employees = write(&self.employees);

        if self.email_in_use(&employees, &new.email, None) {
            return Err(StoreError::EmailTaken(new.email.trim().to_string()));
        }

        let employee = Employee::new(new_id(), new, Utc::now());
        self.emails.insert(&employee.email);
        employees.insert(employee.clone());

        debug!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    async fn update_employee(&self, id: &str, patch: EmployeePatch) -> StoreResult<Employee> {
        let mut employees = write(&self.employees);

        let mut employee = employees
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Employee", id))?;

        if let Some(email) = &patch.email {
            if self.email_in_use(&employees, email, Some(id)) {
                return Err(StoreError::EmailTaken(email.trim().to_string()));
            }
        }

        employee.apply(patch)?;
        self.emails.insert(&employee.email);
        employees.insert(employee.clone());

        debug!(employee_id = %id, "Employee updated");
        Ok(employee)
    }

    async fn delete_employee(&self, id: &str) -> bool {
        let removed = write(&self.employees).remove(id).is_some();
        if removed {
            info!(employee_id = %id, "Employee permanently deleted");
        }
        removed
    }

    async fn soft_delete_employee(&self, id: &str) -> StoreResult<Employee> {
        let (employee, _) = self.transition(id, |e| {
            e.soft_delete(Utc::now());
            true
        })?;
        debug!(employee_id = %id, left_date = ?employee.left_date(), "Employee soft-deleted");
        Ok(employee)
    }

    async fn restore_employee(&self, id: &str) -> StoreResult<Employee> {
        let (employee, changed) = self.transition(id, Employee::restore)?;
        debug!(employee_id = %id, changed, "Employee restored");
        Ok(employee)
    }

    async fn search_employees(&self, filter: &EmployeeFilter) -> Vec<Employee> {
        filter.apply(read(&self.employees).values())
    }

    async fn get_project(&self, id: &str) -> Option<Project> {
        read(&self.projects).get(id).cloned()
    }

    async fn get_all_projects(&self) -> Vec<Project> {
        read(&self.projects).values().cloned().collect()
    }

    async fn create_project(&self, new: NewProject) -> Project {
        let project = Project::new(new_id(), new, Utc::now());
        write(&self.projects).insert(project.clone());

        debug!(project_id = %project.id, "Project created");
        project
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> StoreResult<Project> {
        let mut projects = write(&self.projects);
        let mut project = projects
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Project", id))?;

        project.apply(patch)?;
        projects.insert(project.clone());

        debug!(project_id = %id, "Project updated");
        Ok(project)
    }

    async fn delete_project(&self, id: &str) -> bool {
        write(&self.projects).remove(id).is_some()
    }

    async fn get_attendance(&self, id: &str) -> Option<Attendance> {
        read(&self.attendance).get(id).cloned()
    }

    async fn get_attendance_by_employee(
        &self,
        employee_id: &str,
        date: Option<NaiveDate>,
    ) -> Vec<Attendance> {
        read(&self.attendance)
            .values()
            .filter(|a| a.employee_id == employee_id)
            .filter(|a| date.is_none_or(|day| a.day() == day))
            .cloned()
            .collect()
    }

    async fn get_all_attendance(&self) -> Vec<Attendance> {
        read(&self.attendance).values().cloned().collect()
    }

    async fn create_attendance(&self, new: NewAttendance) -> Attendance {
        let record = Attendance::new(new_id(), new, Utc::now());
        write(&self.attendance).insert(record.clone());

        debug!(attendance_id = %record.id, employee_id = %record.employee_id, "Attendance recorded");
        record
    }

    async fn update_attendance(
        &self,
        id: &str,
        patch: AttendancePatch,
    ) -> StoreResult<Attendance> {
        let mut attendance = write(&self.attendance);
        let mut record = attendance
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Attendance record", id))?;

        record.apply(patch)?;
        attendance.insert(record.clone());

        debug!(attendance_id = %id, "Attendance updated");
        Ok(record)
    }

    async fn dashboard_stats(&self) -> DashboardStats {
        let employees = read(&self.employees);
        let projects = read(&self.projects);
        let attendance = read(&self.attendance);

        DashboardStats::compute(
            employees.values(),
            projects.values(),
            attendance.values(),
            Local::now().date_naive(),
        )
    }
}
