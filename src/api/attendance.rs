use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::IntoParams;

use crate::api::require_text;
use crate::error::{ApiError, StoreError};
use crate::model::attendance::{AttendancePatch, NewAttendance};
use crate::store::Storage;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Only records of this employee
    #[param(example = "emp-1")]
    pub employee_id: Option<String>,
    /// Only records on this calendar day
    #[param(example = "2024-08-20", value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
}

fn validate_new(payload: &NewAttendance) -> Result<(), ApiError> {
    require_text("employeeId", &payload.employee_id)?;

    if let (Some(check_in), Some(check_out)) = (payload.check_in_time, payload.check_out_time) {
        if check_out < check_in {
            return Err(ApiError::validation("checkOutTime must not be before checkInTime"));
        }
    }
    Ok(())
}

/// List attendance, optionally for one employee and/or one calendar day
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records", body = [crate::model::attendance::Attendance])
    ),
    tag = "Attendance"
)]
#[instrument(name = "list_attendance", skip(store))]
pub async fn list_attendance(
    store: web::Data<dyn Storage>,
    query: web::Query<AttendanceQuery>,
) -> impl Responder {
    let AttendanceQuery { employee_id, date } = query.into_inner();

    let records = match employee_id {
        Some(employee_id) => store.get_attendance_by_employee(&employee_id, date).await,
        None => store
            .get_all_attendance()
            .await
            .into_iter()
            .filter(|record| date.is_none_or(|day| record.day() == day))
            .collect(),
    };
    debug!(count = records.len(), "Attendance listed");

    HttpResponse::Ok().json(records)
}

#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Record found", body = crate::model::attendance::Attendance),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let record = store
        .get_attendance(&id)
        .await
        .ok_or_else(|| ApiError::from(StoreError::not_found("Attendance record", &id)))?;

    Ok(HttpResponse::Ok().json(record))
}

/// Record attendance (check-in)
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = NewAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = crate::model::attendance::Attendance),
        (status = 400, description = "Validation failed")
    ),
    tag = "Attendance"
)]
#[instrument(name = "create_attendance", skip(store, payload), fields(employee_id = %payload.employee_id))]
pub async fn create_attendance(
    store: web::Data<dyn Storage>,
    payload: web::Json<NewAttendance>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    validate_new(&payload)?;

    let record = store.create_attendance(payload).await;
    Ok(HttpResponse::Created().json(record))
}

/// Update attendance, e.g. set `checkOutTime` on check-out
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    request_body = AttendancePatch,
    responses(
        (status = 200, description = "Attendance updated", body = crate::model::attendance::Attendance),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
#[instrument(name = "update_attendance", skip(store, path, patch), fields(attendance_id = %path))]
pub async fn update_attendance(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
    patch: web::Json<AttendancePatch>,
) -> actix_web::Result<impl Responder> {
    let patch = patch.into_inner();
    if patch.is_empty() {
        return Err(ApiError::validation("No fields provided for update").into());
    }
    if let Some(employee_id) = &patch.employee_id {
        require_text("employeeId", employee_id)?;
    }

    let record = store
        .update_attendance(&path.into_inner(), patch)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(record))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::{Local, Utc};
    use serde_json::{Value, json};

    use crate::api::test_support;
    use crate::routes;

    #[actix_web::test]
    async fn check_in_check_out_and_filter() {
        let app = test::init_service(
            App::new()
                .app_data(test_support::sample_store())
                .configure(|cfg| routes::configure(cfg, &test_support::config())),
        )
        .await;

        let now = Utc::now();
        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({
                "employeeId": "emp-1",
                "date": now,
                "status": "present",
                "checkInTime": now,
                "location": "IT Park, Bangalore"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let uri = format!("/api/attendance/{}", created["id"].as_str().unwrap());

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "checkOutTime": Utc::now() }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert!(updated["checkOutTime"].is_string());
        assert_eq!(updated["location"], "IT Park, Bangalore");

        let today = Local::now().date_naive().format("%Y-%m-%d");
        let req = test::TestRequest::get()
            .uri(&format!("/api/attendance?employeeId=emp-1&date={today}"))
            .to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri("/api/attendance?employeeId=emp-2")
            .to_request();
        let other: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(other, json!([]));

        let req = test::TestRequest::get().uri("/api/dashboard/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["onSiteToday"], 1);
    }

    #[actix_web::test]
    async fn check_out_before_check_in_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(test_support::sample_store())
                .configure(|cfg| routes::configure(cfg, &test_support::config())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({
                "employeeId": "emp-2",
                "date": "2024-08-20T00:00:00Z",
                "status": "present",
                "checkInTime": "2024-08-20T10:00:00Z"
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/attendance/{}", created["id"].as_str().unwrap());

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "checkOutTime": "2024-08-20T08:00:00Z" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "checkOutTime must not be before checkInTime");

        let req = test::TestRequest::get().uri(&uri).to_request();
        let stored: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stored["checkOutTime"], Value::Null);
    }

    #[actix_web::test]
    async fn unknown_record_and_bad_query() {
        let app = test::init_service(
            App::new()
                .app_data(test_support::sample_store())
                .configure(|cfg| routes::configure(cfg, &test_support::config())),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/attendance/missing")
            .set_json(json!({ "status": "late" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::get()
            .uri("/api/attendance?date=yesterday")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
