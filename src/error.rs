use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Failures raised by the data store for well-formed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Email {0} is already registered")]
    EmailTaken(String),

    #[error("Employee {0} has left; restore the employee before changing status or project")]
    EmployeeLeft(String),

    #[error("{0}")]
    InvalidRange(&'static str),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Errors surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::EmailTaken(_)) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::EmployeeLeft(_)) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::InvalidRange(_)) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_http_statuses() {
        let not_found = ApiError::from(StoreError::not_found("Employee", "emp-9"));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Employee not found");

        let taken = ApiError::from(StoreError::EmailTaken("a@b.com".into()));
        assert_eq!(taken.status_code(), StatusCode::CONFLICT);

        let range = ApiError::from(StoreError::InvalidRange("endDate must not be before startDate"));
        assert_eq!(range.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(range.to_string(), "endDate must not be before startDate");

        let invalid = ApiError::validation("firstName must not be empty");
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    }
}
