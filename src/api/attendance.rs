use crate::{
    error::AppResult,
    models::{DateFilter, DateRange, EmployeeRef, MarkAttendance},
    service,
};
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// Mark attendance for an employee, replacing any earlier mark for that day
#[utoipa::path(
    post,
    path = "/api/attendance",
    params(
        ("employee_id" = i64, Query, description = "Employee surrogate id")
    ),
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = Attendance),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID 1 not found"
        })),
        (status = 422, description = "Invalid date, status or employee_id")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeRef>,
    payload: web::Json<MarkAttendance>,
) -> AppResult<HttpResponse> {
    let record =
        service::attendance::mark_attendance(pool.get_ref(), query.employee_id, payload.into_inner())
            .await?;
    Ok(HttpResponse::Created().json(record))
}

/// Attendance history of one employee
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id" = i64, Path, description = "Employee surrogate id"),
        ("start_date" = Option<String>, Query, description = "Inclusive lower bound, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Inclusive upper bound, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Records, newest first", body = [Attendance]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<DateRange>,
) -> AppResult<HttpResponse> {
    let records =
        service::attendance::employee_attendance(pool.get_ref(), path.into_inner(), query.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(records))
}

/// All attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(
        ("date" = Option<String>, Query, description = "Only this day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Records, newest first", body = [Attendance])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<DateFilter>,
) -> AppResult<HttpResponse> {
    let records = service::attendance::all_attendance(pool.get_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(records))
}
