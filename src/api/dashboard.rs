use actix_web::{HttpResponse, Responder, web};
use tracing::debug;

use crate::store::Storage;

/// Dashboard summary, recomputed on every call
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Summary counts", body = crate::model::dashboard::DashboardStats)
    ),
    tag = "Dashboard"
)]
pub async fn get_stats(store: web::Data<dyn Storage>) -> impl Responder {
    let stats = store.dashboard_stats().await;
    debug!(?stats, "Dashboard stats computed");

    HttpResponse::Ok().json(stats)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};

    use crate::api::test_support;
    use crate::model::dashboard::DashboardStats;
    use crate::routes;

    #[actix_web::test]
    async fn sample_stats_over_http() {
        let app = test::init_service(
            App::new()
                .app_data(test_support::sample_store())
                .configure(|cfg| routes::configure(cfg, &test_support::config())),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/dashboard/stats").to_request();
        let stats: DashboardStats = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            stats,
            DashboardStats {
                total_employees: 3,
                active_projects: 2,
                on_site_today: 0,
                pending_tasks: 1,
            }
        );
    }
}
