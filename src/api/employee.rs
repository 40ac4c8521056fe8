use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument};
use utoipa::IntoParams;

use crate::api::require_text;
use crate::error::{ApiError, StoreError};
use crate::model::employee::{EmployeePatch, EmployeeStatus, NewEmployee};
use crate::model::role::{Role, Specialization};
use crate::store::search::parse_choice;
use crate::store::{EmployeeFilter, Storage};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Case-insensitive match on first name, last name or email
    #[param(example = "priya")]
    pub search: Option<String>,
    /// Role, or `all`
    #[param(example = "technician")]
    pub role: Option<String>,
    /// Specialization, or `all`
    #[param(example = "all")]
    pub specialization: Option<String>,
    /// Status, or `all`
    #[param(example = "all")]
    pub status: Option<String>,
    /// List employees who left instead of active ones
    pub show_left: Option<bool>,
}

impl EmployeeQuery {
    fn into_filter(self) -> Result<EmployeeFilter, ApiError> {
        Ok(EmployeeFilter {
            role: parse_choice::<Role>(self.role.as_deref())
                .map_err(|_| invalid_choice("role", self.role.as_deref()))?,
            specialization: parse_choice::<Specialization>(self.specialization.as_deref())
                .map_err(|_| invalid_choice("specialization", self.specialization.as_deref()))?,
            status: parse_choice::<EmployeeStatus>(self.status.as_deref())
                .map_err(|_| invalid_choice("status", self.status.as_deref()))?,
            query: self.search,
            show_left: self.show_left.unwrap_or(false),
        })
    }
}

fn invalid_choice(field: &str, value: Option<&str>) -> ApiError {
    ApiError::validation(format!("Unknown {field} filter: {}", value.unwrap_or_default()))
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = email
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.contains('@'));

    if valid {
        Ok(())
    } else {
        Err(ApiError::validation(format!("Invalid email address: {email}")))
    }
}

fn validate_new(payload: &NewEmployee) -> Result<(), ApiError> {
    require_text("firstName", &payload.first_name)?;
    require_text("lastName", &payload.last_name)?;
    require_text("phone", &payload.phone)?;
    validate_email(&payload.email)
}

fn validate_patch(patch: &EmployeePatch) -> Result<(), ApiError> {
    if patch.is_empty() {
        return Err(ApiError::validation("No fields provided for update"));
    }
    if let Some(first_name) = &patch.first_name {
        require_text("firstName", first_name)?;
    }
    if let Some(last_name) = &patch.last_name {
        require_text("lastName", last_name)?;
    }
    if let Some(phone) = &patch.phone {
        require_text("phone", phone)?;
    }
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    Ok(())
}

/// Search employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employees matching every filter, in insertion order", body = [crate::model::employee::EmployeeRecord]),
        (status = 400, description = "Unknown filter value", body = Object, example = json!({
            "message": "Unknown role filter: manager"
        }))
    ),
    tag = "Employee"
)]
#[instrument(name = "list_employees", skip(store, query))]
pub async fn list_employees(
    store: web::Data<dyn Storage>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let filter = query.into_inner().into_filter()?;
    debug!(?filter, "Searching employees");

    let employees = store.search_employees(&filter).await;
    debug!(count = employees.len(), "Employees found");

    Ok(HttpResponse::Ok().json(employees))
}

/// List employees who left
#[utoipa::path(
    get,
    path = "/api/employees/left",
    responses(
        (status = 200, description = "Soft-deleted employees", body = [crate::model::employee::EmployeeRecord])
    ),
    tag = "Employee"
)]
pub async fn list_left_employees(store: web::Data<dyn Storage>) -> impl Responder {
    HttpResponse::Ok().json(store.get_left_employees().await)
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::EmployeeRecord),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let employee = store
        .get_employee(&id)
        .await
        .ok_or_else(|| ApiError::from(StoreError::not_found("Employee", &id)))?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = crate::model::employee::EmployeeRecord),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "firstName must not be empty"
        })),
        (status = 409, description = "Email already registered", body = Object, example = json!({
            "message": "Email rajesh.kumar@sgenterprises.com is already registered"
        }))
    ),
    tag = "Employee"
)]
#[instrument(name = "create_employee", skip(store, payload), fields(email = %payload.email))]
pub async fn create_employee(
    store: web::Data<dyn Storage>,
    payload: web::Json<NewEmployee>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    validate_new(&payload)?;

    let employee = store.create_employee(payload).await.map_err(ApiError::from)?;
    info!(employee_id = %employee.id, "Employee created");

    Ok(HttpResponse::Created().json(employee))
}

/// Update Employee
///
/// Lifecycle fields cannot be changed here; use soft-delete and restore.
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    request_body = EmployeePatch,
    responses(
        (status = 200, description = "Employee updated", body = crate::model::employee::EmployeeRecord),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 409, description = "Email taken, or status change on an employee who left")
    ),
    tag = "Employee"
)]
#[instrument(name = "update_employee", skip(store, path, patch), fields(employee_id = %path))]
pub async fn update_employee(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
    patch: web::Json<EmployeePatch>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let patch = patch.into_inner();
    validate_patch(&patch)?;

    let employee = store
        .update_employee(&id, patch)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee permanently
///
/// Administrative only; regular offboarding goes through soft-delete.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
#[instrument(name = "delete_employee", skip(store, path), fields(employee_id = %path))]
pub async fn delete_employee(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    if !store.delete_employee(&id).await {
        return Err(ApiError::from(StoreError::not_found("Employee", &id)).into());
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}

/// Mark an employee as left
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/soft-delete",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee marked as left", body = crate::model::employee::EmployeeRecord),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
#[instrument(name = "soft_delete_employee", skip(store, path), fields(employee_id = %path))]
pub async fn soft_delete_employee(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee = store
        .soft_delete_employee(&path.into_inner())
        .await
        .map_err(ApiError::from)?;
    info!("Employee marked as left");

    Ok(HttpResponse::Ok().json(employee))
}

/// Bring an employee back as available
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/restore",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee active and available", body = crate::model::employee::EmployeeRecord),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
#[instrument(name = "restore_employee", skip(store, path), fields(employee_id = %path))]
pub async fn restore_employee(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee = store
        .restore_employee(&path.into_inner())
        .await
        .map_err(ApiError::from)?;
    info!("Employee restored");

    Ok(HttpResponse::Ok().json(employee))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::api::test_support;
    use crate::routes;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(test_support::sample_store())
                    .configure(|cfg| routes::configure(cfg, &test_support::config())),
            )
            .await
        };
    }

    fn names(body: &Value) -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|e| format!("{} {}", e["firstName"].as_str().unwrap(), e["lastName"].as_str().unwrap()))
            .collect()
    }

    #[actix_web::test]
    async fn search_with_all_sentinels() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/employees?search=priya&role=all&specialization=all&status=all")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&body), ["Priya Sharma"]);
    }

    #[actix_web::test]
    async fn role_filter_on_active_partition() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/employees?search=&role=technician")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&body), ["Rajesh Kumar", "Mohammed Ali"]);
    }

    #[actix_web::test]
    async fn show_left_and_left_listing_agree() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/employees?showLeft=true")
            .to_request();
        let filtered: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get().uri("/api/employees/left").to_request();
        let left: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(names(&filtered), ["Neha Patel"]);
        assert_eq!(filtered, left);
        assert_eq!(left[0]["isActive"], "false");
    }

    #[actix_web::test]
    async fn unknown_filter_value_is_bad_request() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/employees?role=manager")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_then_fetch() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({
                "firstName": "Arjun",
                "lastName": "Mehta",
                "email": "arjun.mehta@sgenterprises.com",
                "phone": "+91 90000 11111",
                "role": "technician",
                "specialization": "chiller"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["status"], "available");
        assert_eq!(created["isActive"], "true");

        let uri = format!("/api/employees/{}", created["id"].as_str().unwrap());
        let req = test::TestRequest::get().uri(&uri).to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn create_with_duplicate_email_conflicts() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({
                "firstName": "Raj",
                "lastName": "Kumar",
                "email": "RAJESH.KUMAR@sgenterprises.com",
                "phone": "+91 90000 22222",
                "role": "sales",
                "specialization": "general"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn create_with_invalid_payload_is_bad_request() {
        let app = app!();
        for payload in [
            json!({ "firstName": "A" }),
            json!({
                "firstName": " ",
                "lastName": "B",
                "email": "a.b@sg.com",
                "phone": "1",
                "role": "admin",
                "specialization": "ac"
            }),
            json!({
                "firstName": "A",
                "lastName": "B",
                "email": "not-an-email",
                "phone": "1",
                "role": "admin",
                "specialization": "ac"
            }),
            json!({
                "firstName": "A",
                "lastName": "B",
                "email": "a.b@sg.com",
                "phone": "1",
                "role": "admin",
                "specialization": "ac",
                "status": "left"
            }),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/employees")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert!(body["message"].is_string());
        }
    }

    #[actix_web::test]
    async fn soft_delete_restore_flow() {
        let app = app!();
        let req = test::TestRequest::patch()
            .uri("/api/employees/emp-2/soft-delete")
            .to_request();
        let left: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(left["status"], "left");
        assert!(left["currentProject"].is_null());
        assert!(left["leftDate"].is_string());

        // Status is frozen while the employee is gone
        let req = test::TestRequest::put()
            .uri("/api/employees/emp-2")
            .set_json(json!({ "status": "on-project" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::patch()
            .uri("/api/employees/emp-2/restore")
            .to_request();
        let restored: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(restored["status"], "available");
        assert_eq!(restored["isActive"], "true");
        assert!(restored["currentProject"].is_null());
        assert!(restored["leftDate"].is_null());
    }

    #[actix_web::test]
    async fn update_merges_fields() {
        let app = app!();
        let req = test::TestRequest::patch()
            .uri("/api/employees/emp-3")
            .set_json(json!({ "status": "available", "phone": "+91 91111 00000" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["status"], "available");
        assert_eq!(updated["phone"], "+91 91111 00000");
        assert_eq!(updated["firstName"], "Mohammed");
    }

    #[actix_web::test]
    async fn update_rejects_empty_and_lifecycle_payloads() {
        let app = app!();
        for payload in [json!({}), json!({ "isActive": "false" }), json!({ "leftDate": null })] {
            let req = test::TestRequest::put()
                .uri("/api/employees/emp-1")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn missing_employee_is_not_found() {
        let app = app!();
        for req in [
            test::TestRequest::get().uri("/api/employees/emp-99").to_request(),
            test::TestRequest::delete().uri("/api/employees/emp-99").to_request(),
            test::TestRequest::patch()
                .uri("/api/employees/emp-99/restore")
                .to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Employee not found");
        }
    }

    #[actix_web::test]
    async fn hard_delete_removes_record() {
        let app = app!();
        let req = test::TestRequest::delete()
            .uri("/api/employees/emp-4")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/employees/left").to_request();
        let left: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(left, json!([]));
    }
}
