use chrono::{DateTime, Local, NaiveDate, Utc};
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
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    /// Not checked against the employee store
    #[schema(example = "emp-1")]
    pub employee_id: String,
    #[schema(example = "2024-08-20T00:00:00Z", format = "date-time", value_type = String)]
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub check_out_time: Option<DateTime<Utc>>,
    #[schema(example = "Phoenix Mall, Mumbai")]
    pub location: Option<String>,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl Attendance {
    pub fn new(id: String, new: NewAttendance, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            employee_id: new.employee_id,
            date: new.date,
            status: new.status,
            check_in_time: new.check_in_time,
            check_out_time: new.check_out_time,
            location: new.location,
            created_at,
        }
    }

    /// Calendar day of `date` in the server's local time zone.
    pub fn day(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }

    /// Merges `patch`; check-out may not end up before check-in.
    pub fn apply(&mut self, patch: AttendancePatch) -> StoreResult<()> {
        if let Some(employee_id) = patch.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(check_in_time) = patch.check_in_time {
            self.check_in_time = check_in_time;
        }
        if let Some(check_out_time) = patch.check_out_time {
            self.check_out_time = check_out_time;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }

        match (self.check_in_time, self.check_out_time) {
            (Some(check_in), Some(check_out)) if check_out < check_in => {
                Err(StoreError::InvalidRange("checkOutTime must not be before checkInTime"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAttendance {
    #[schema(example = "emp-1")]
    pub employee_id: String,
    #[schema(example = "2024-08-20T00:00:00Z", format = "date-time", value_type = String)]
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    #[serde(default)]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttendancePatch {
    pub employee_id: Option<String>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub date: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub check_in_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub check_out_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
}

impl AttendancePatch {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none()
            && self.date.is_none()
            && self.status.is_none()
            && self.check_in_time.is_none()
            && self.check_out_time.is_none()
            && self.location.is_none()
    }
}
