use crate::model::attendance::{Attendance, AttendancePatch, AttendanceStatus, NewAttendance};
use crate::model::dashboard::DashboardStats;
use crate::model::employee::{ActiveStatus, EmployeePatch, EmployeeRecord, EmployeeStatus, NewEmployee};
use crate::model::project::{NewProject, Project, ProjectPatch, ProjectStatus, ProjectType};
use crate::model::role::{Role, Specialization};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SG Enterprises Workforce API",
        version = "1.0.0",
        description = r#"
## Workforce management for an HVAC services team

### 🔹 Key Features
- **Employees**
  - Search by name or email, filter by role, specialization and status
  - Soft-delete employees who leave and restore them later
- **Projects**
  - Track mall, office and company sites and who is assigned
- **Attendance**
  - Record check-in / check-out per employee and day
- **Dashboard**
  - Headcount, active projects, staff on site today, available staff

### 📦 Response Format
- JSON with camelCase fields
- Errors are returned as `{"message": "..."}`

### ⚠️ Storage
Data lives in process memory and is lost on restart.

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::list_left_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::soft_delete_employee,
        crate::api::employee::restore_employee,

        crate::api::project::list_projects,
        crate::api::project::get_project,
        crate::api::project::create_project,
        crate::api::project::update_project,
        crate::api::project::delete_project,

        crate::api::attendance::list_attendance,
        crate::api::attendance::get_attendance,
        crate::api::attendance::create_attendance,
        crate::api::attendance::update_attendance,

        crate::api::dashboard::get_stats
    ),
    components(
        schemas(
            EmployeeRecord,
            NewEmployee,
            EmployeePatch,
            EmployeeStatus,
            ActiveStatus,
            Role,
            Specialization,
            Project,
            NewProject,
            ProjectPatch,
            ProjectType,
            ProjectStatus,
            Attendance,
            NewAttendance,
            AttendancePatch,
            AttendanceStatus,
            DashboardStats
        )
    ),
    tags(
        (name = "Employee", description = "Employee records and lifecycle"),
        (name = "Project", description = "Project sites and assignments"),
        (name = "Attendance", description = "Daily attendance"),
        (name = "Dashboard", description = "Summary statistics"),
    )
)]
pub struct ApiDoc;
