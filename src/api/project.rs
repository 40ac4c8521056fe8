use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::{info, instrument};

use crate::api::require_text;
use crate::error::{ApiError, StoreError};
use crate::model::project::{NewProject, ProjectPatch};
use crate::store::Storage;

fn validate_new(payload: &NewProject) -> Result<(), ApiError> {
    require_text("name", &payload.name)?;
    require_text("location", &payload.location)?;

    if let (Some(start), Some(end)) = (payload.start_date, payload.end_date) {
        if end < start {
            return Err(ApiError::validation("endDate must not be before startDate"));
        }
    }
    Ok(())
}

fn validate_patch(patch: &ProjectPatch) -> Result<(), ApiError> {
    if patch.is_empty() {
        return Err(ApiError::validation("No fields provided for update"));
    }
    if let Some(name) = &patch.name {
        require_text("name", name)?;
    }
    if let Some(location) = &patch.location {
        require_text("location", location)?;
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "All projects", body = [crate::model::project::Project])
    ),
    tag = "Project"
)]
pub async fn list_projects(store: web::Data<dyn Storage>) -> impl Responder {
    HttpResponse::Ok().json(store.get_all_projects().await)
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id", Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = crate::model::project::Project),
        (status = 404, description = "Project not found", body = Object, example = json!({
            "message": "Project not found"
        }))
    ),
    tag = "Project"
)]
pub async fn get_project(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let project = store
        .get_project(&id)
        .await
        .ok_or_else(|| ApiError::from(StoreError::not_found("Project", &id)))?;

    Ok(HttpResponse::Ok().json(project))
}

/// Create Project
///
/// Assigned employee ids are stored as given.
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = NewProject,
    responses(
        (status = 201, description = "Project created", body = crate::model::project::Project),
        (status = 400, description = "Validation failed")
    ),
    tag = "Project"
)]
#[instrument(name = "create_project", skip(store, payload), fields(name = %payload.name))]
pub async fn create_project(
    store: web::Data<dyn Storage>,
    payload: web::Json<NewProject>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    validate_new(&payload)?;

    let project = store.create_project(payload).await;
    info!(project_id = %project.id, "Project created");

    Ok(HttpResponse::Created().json(project))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id", Path, description = "Project ID")
    ),
    request_body = ProjectPatch,
    responses(
        (status = 200, description = "Project updated", body = crate::model::project::Project),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Project not found")
    ),
    tag = "Project"
)]
#[instrument(name = "update_project", skip(store, path, patch), fields(project_id = %path))]
pub async fn update_project(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
    patch: web::Json<ProjectPatch>,
) -> actix_web::Result<impl Responder> {
    let patch = patch.into_inner();
    validate_patch(&patch)?;

    let project = store
        .update_project(&path.into_inner(), patch)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(project))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id", Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Project not found")
    ),
    tag = "Project"
)]
#[instrument(name = "delete_project", skip(store, path), fields(project_id = %path))]
pub async fn delete_project(
    store: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    if !store.delete_project(&id).await {
        return Err(ApiError::from(StoreError::not_found("Project", &id)).into());
    }

    info!("Project deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::api::test_support;
    use crate::routes;

    #[actix_web::test]
    async fn project_lifecycle_over_http() {
        let app = test::init_service(
            App::new()
                .app_data(test_support::sample_store())
                .configure(|cfg| routes::configure(cfg, &test_support::config())),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/projects").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(json!({
                "name": "Lodha Office Ducting",
                "location": "Thane",
                "type": "company",
                "assignedEmployees": ["emp-1", "emp-3"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["status"], "active");
        let uri = format!("/api/projects/{}", created["id"].as_str().unwrap());

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "status": "completed" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["status"], "completed");
        assert_eq!(updated["name"], "Lodha Office Ducting");

        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn rejects_end_before_start() {
        let app = test::init_service(
            App::new()
                .app_data(test_support::sample_store())
                .configure(|cfg| routes::configure(cfg, &test_support::config())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(json!({
                "name": "Backwards",
                "location": "Pune",
                "type": "mall",
                "startDate": "2024-09-01T00:00:00Z",
                "endDate": "2024-08-01T00:00:00Z"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // proj-1 starts 2024-08-01; only the end date is sent
        let req = test::TestRequest::put()
            .uri("/api/projects/proj-1")
            .set_json(json!({ "endDate": "2020-01-01T00:00:00Z" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "endDate must not be before startDate");

        let req = test::TestRequest::get().uri("/api/projects/proj-1").to_request();
        let unchanged: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(unchanged["endDate"], Value::Null);
    }
}
