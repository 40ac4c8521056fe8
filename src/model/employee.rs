use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::{StoreError, StoreResult};
use crate::model::nullable;
use crate::model::role::{Role, Specialization};

const ACTIVE_FLAG: &str = "true";
const LEFT_FLAG: &str = "false";

/// Status as it appears on the wire and in filters.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EmployeeStatus {
    Available,
    OnProject,
    OnLeave,
    Left,
}

/// Statuses an active employee can hold. `left` is only reachable through a soft delete.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveStatus {
    #[default]
    Available,
    OnProject,
    OnLeave,
}

impl From<ActiveStatus> for EmployeeStatus {
    fn from(status: ActiveStatus) -> Self {
        match status {
            ActiveStatus::Available => EmployeeStatus::Available,
            ActiveStatus::OnProject => EmployeeStatus::OnProject,
            ActiveStatus::OnLeave => EmployeeStatus::OnLeave,
        }
    }
}

/// Where an employee sits in the active/left lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Active {
        status: ActiveStatus,
        current_project: Option<String>,
    },
    Left {
        left_date: DateTime<Utc>,
    },
}

impl Lifecycle {
    pub fn available() -> Self {
        Lifecycle::Active {
            status: ActiveStatus::Available,
            current_project: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EmployeeRecord", try_from = "EmployeeRecord")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub specialization: Specialization,
    pub emergency_contact: Option<String>,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(id: String, new: NewEmployee, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email.trim().to_string(),
            phone: new.phone,
            role: new.role,
            specialization: new.specialization,
            emergency_contact: new.emergency_contact,
            lifecycle: Lifecycle::Active {
                status: new.status.unwrap_or_default(),
                current_project: new.current_project,
            },
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Active { .. })
    }

    pub fn status(&self) -> EmployeeStatus {
        match &self.lifecycle {
            Lifecycle::Active { status, .. } => (*status).into(),
            Lifecycle::Left { .. } => EmployeeStatus::Left,
        }
    }

    pub fn current_project(&self) -> Option<&str> {
        match &self.lifecycle {
            Lifecycle::Active {
                current_project, ..
            } => current_project.as_deref(),
            Lifecycle::Left { .. } => None,
        }
    }

    pub fn left_date(&self) -> Option<DateTime<Utc>> {
        match &self.lifecycle {
            Lifecycle::Left { left_date } => Some(*left_date),
            Lifecycle::Active { .. } => None,
        }
    }

    /// Active -> Left. The current project is discarded and cannot be recovered by `restore`.
    /// On an employee who already left only `leftDate` moves to `now`.
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.lifecycle = Lifecycle::Left { left_date: now };
    }

    /// Left -> Active as `available` with no project. A no-op for active employees.
    pub fn restore(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.lifecycle = Lifecycle::available();
        true
    }

    /// Merges a partial update. Status and project of a left employee are frozen.
    /// Email uniqueness is the store's job.
    pub fn apply(&mut self, patch: EmployeePatch) -> StoreResult<()> {
        if !self.is_active() && (patch.status.is_some() || patch.current_project.is_some()) {
            return Err(StoreError::EmployeeLeft(self.id.clone()));
        }

        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email.trim().to_string();
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(specialization) = patch.specialization {
            self.specialization = specialization;
        }
        if let Some(emergency_contact) = patch.emergency_contact {
            self.emergency_contact = emergency_contact;
        }

        if let Lifecycle::Active {
            status,
            current_project,
        } = &mut self.lifecycle
        {
            if let Some(new_status) = patch.status {
                *status = new_status;
            }
            if let Some(project) = patch.current_project {
                *current_project = project;
            }
        }

        Ok(())
    }
}

/// Emails are unique regardless of case or surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// JSON shape of an employee.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "emp-1",
        "firstName": "Rajesh",
        "lastName": "Kumar",
        "email": "rajesh.kumar@sgenterprises.com",
        "phone": "+91 98765 43210",
        "role": "technician",
        "specialization": "chiller",
        "emergencyContact": "Sunita Kumar - +91 98765 43211",
        "status": "available",
        "currentProject": null,
        "isActive": "true",
        "leftDate": null,
        "createdAt": "2024-01-15T00:00:00Z"
    })
)]
pub struct EmployeeRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub specialization: Specialization,
    pub emergency_contact: Option<String>,
    pub status: EmployeeStatus,
    pub current_project: Option<String>,
    /// "true" while employed, "false" once the employee has left
    #[schema(example = "true")]
    pub is_active: String,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub left_date: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeRecord {
    fn from(employee: Employee) -> Self {
        let status = employee.status();
        let is_active = if employee.is_active() { ACTIVE_FLAG } else { LEFT_FLAG };
        let (current_project, left_date) = match employee.lifecycle {
            Lifecycle::Active {
                current_project, ..
            } => (current_project, None),
            Lifecycle::Left { left_date } => (None, Some(left_date)),
        };

        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            phone: employee.phone,
            role: employee.role,
            specialization: employee.specialization,
            emergency_contact: employee.emergency_contact,
            status,
            current_project,
            is_active: is_active.to_string(),
            left_date,
            created_at: employee.created_at,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("inconsistent employee lifecycle: status={status}, isActive={is_active}, leftDate set={has_left_date}")]
pub struct LifecycleError {
    status: EmployeeStatus,
    is_active: String,
    has_left_date: bool,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = LifecycleError;

    fn try_from(record: EmployeeRecord) -> Result<Self, Self::Error> {
        let lifecycle = match (
            record.status,
            record.is_active.as_str(),
            record.left_date,
            &record.current_project,
        ) {
            (EmployeeStatus::Left, LEFT_FLAG, Some(left_date), None) => Lifecycle::Left { left_date },
            (status, ACTIVE_FLAG, None, _) if status != EmployeeStatus::Left => Lifecycle::Active {
                status: match status {
                    EmployeeStatus::OnProject => ActiveStatus::OnProject,
                    EmployeeStatus::OnLeave => ActiveStatus::OnLeave,
                    _ => ActiveStatus::Available,
                },
                current_project: record.current_project.clone(),
            },
            (status, is_active, left_date, _) => {
                return Err(LifecycleError {
                    status,
                    is_active: is_active.to_string(),
                    has_left_date: left_date.is_some(),
                });
            }
        };

        Ok(Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            phone: record.phone,
            role: record.role,
            specialization: record.specialization,
            emergency_contact: record.emergency_contact,
            lifecycle,
            created_at: record.created_at,
        })
    }
}

/// Create payload. New employees always start active.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewEmployee {
    #[schema(example = "Rajesh")]
    pub first_name: String,
    #[schema(example = "Kumar")]
    pub last_name: String,
    #[schema(example = "rajesh.kumar@sgenterprises.com", format = "email")]
    pub email: String,
    #[schema(example = "+91 98765 43210")]
    pub phone: String,
    pub role: Role,
    pub specialization: Specialization,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    /// Defaults to `available`
    #[serde(default)]
    pub status: Option<ActiveStatus>,
    #[serde(default)]
    pub current_project: Option<String>,
}

/// Partial update. `null` clears a nullable field, an absent key leaves it alone.
/// Lifecycle fields (`isActive`, `leftDate`, `status: left`) are rejected.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub specialization: Option<Specialization>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub emergency_contact: Option<Option<String>>,
    pub status: Option<ActiveStatus>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub current_project: Option<Option<String>>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.specialization.is_none()
            && self.emergency_contact.is_none()
            && self.status.is_none()
            && self.current_project.is_none()
    }
}
