use crate::{config::Config, error::AppResult, service};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::SqlitePool;

/// Today's headcount and attendance
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Stats for the current day in the configured timezone", body = DashboardStats)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_stats(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let today = config.stats_timezone.today();
    let stats = service::stats::dashboard_stats(pool.get_ref(), today).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "status": "healthy",
            "message": "HRMS Lite API is running"
        }))
    ),
    tag = "Health"
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "message": "HRMS Lite API is running"
    }))
}
