pub mod attendance;
pub mod dashboard;
pub mod employee;
pub mod project;

use crate::error::ApiError;

/// Rejects blank required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
