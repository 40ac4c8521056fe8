//! Demo records loaded when `SEED_SAMPLE_DATA` is on.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::employee::{ActiveStatus, Employee, Lifecycle};
use crate::model::project::{Project, ProjectStatus, ProjectType};
use crate::model::role::{Role, Specialization};

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn employee(
    id: &str,
    first_name: &str,
    last_name: &str,
    phone: &str,
    role: Role,
    specialization: Specialization,
    emergency_contact: &str,
    lifecycle: Lifecycle,
    created_at: DateTime<Utc>,
) -> Employee {
    Employee {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@sgenterprises.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        phone: phone.to_string(),
        role,
        specialization,
        emergency_contact: Some(emergency_contact.to_string()),
        lifecycle,
        created_at,
    }
}

pub fn employees() -> Vec<Employee> {
    vec![
        employee(
            "emp-1",
            "Rajesh",
            "Kumar",
            "+91 98765 43210",
            Role::Technician,
            Specialization::Chiller,
            "Sunita Kumar - +91 98765 43211",
            Lifecycle::available(),
            day(2024, 1, 15),
        ),
        employee(
            "emp-2",
            "Priya",
            "Sharma",
            "+91 98765 43212",
            Role::Supervisor,
            Specialization::Ac,
            "Amit Sharma - +91 98765 43213",
            Lifecycle::Active {
                status: ActiveStatus::OnProject,
                current_project: Some("Phoenix Mall AC Installation".to_string()),
            },
            day(2024, 1, 20),
        ),
        employee(
            "emp-3",
            "Mohammed",
            "Ali",
            "+91 98765 43214",
            Role::Technician,
            Specialization::Compressor,
            "Fatima Ali - +91 98765 43215",
            Lifecycle::Active {
                status: ActiveStatus::OnLeave,
                current_project: None,
            },
            day(2024, 2, 1),
        ),
        employee(
            "emp-4",
            "Neha",
            "Patel",
            "+91 98765 43216",
            Role::Sales,
            Specialization::General,
            "Kiran Patel - +91 98765 43217",
            Lifecycle::Left {
                left_date: day(2024, 8, 1),
            },
            day(2023, 11, 10),
        ),
    ]
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "proj-1".to_string(),
            name: "Phoenix Mall AC Installation".to_string(),
            location: "Phoenix Mall, Mumbai".to_string(),
            kind: ProjectType::Mall,
            status: ProjectStatus::Active,
            assigned_employees: ["emp-2".to_string()].into(),
            start_date: Some(day(2024, 8, 1)),
            end_date: None,
            created_at: day(2024, 7, 25),
        },
        Project {
            id: "proj-2".to_string(),
            name: "Tech Park Chiller Maintenance".to_string(),
            location: "IT Park, Bangalore".to_string(),
            kind: ProjectType::Office,
            status: ProjectStatus::Active,
            assigned_employees: ["emp-1".to_string()].into(),
            start_date: Some(day(2024, 7, 15)),
            end_date: Some(day(2024, 8, 15)),
            created_at: day(2024, 7, 10),
        },
    ]
}
