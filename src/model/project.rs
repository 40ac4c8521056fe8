use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::{StoreError, StoreResult};
use crate::model::nullable;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectType {
    Mall,
    Office,
    Company,
}

#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "proj-1",
        "name": "Phoenix Mall AC Installation",
        "location": "Phoenix Mall, Mumbai",
        "type": "mall",
        "status": "active",
        "assignedEmployees": ["emp-2"],
        "startDate": "2024-08-01T00:00:00Z",
        "endDate": null,
        "createdAt": "2024-07-25T00:00:00Z"
    })
)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    pub status: ProjectStatus,
    /// Employee ids; not checked against the employee store
    #[schema(value_type = Vec<String>)]
    pub assigned_employees: BTreeSet<String>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub start_date: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub end_date: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(id: String, new: NewProject, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            location: new.location,
            kind: new.kind,
            status: new.status.unwrap_or_default(),
            assigned_employees: new.assigned_employees.into_iter().collect(),
            start_date: new.start_date,
            end_date: new.end_date,
            created_at,
        }
    }

    /// Merges `patch`; the merged dates must still be in order.
    pub fn apply(&mut self, patch: ProjectPatch) -> StoreResult<()> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assigned) = patch.assigned_employees {
            self.assigned_employees = assigned.into_iter().collect();
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end < start => {
                Err(StoreError::InvalidRange("endDate must not be before startDate"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProject {
    #[schema(example = "Tech Park Chiller Maintenance")]
    pub name: String,
    #[schema(example = "IT Park, Bangalore")]
    pub location: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    /// Defaults to `active`
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub assigned_employees: Vec<String>,
    #[serde(default)]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ProjectType>,
    pub status: Option<ProjectStatus>,
    pub assigned_employees: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub end_date: Option<Option<DateTime<Utc>>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.kind.is_none()
            && self.status.is_none()
            && self.assigned_employees.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}
