use crate::{
    error::AppResult,
    model::{attendance::Attendance, employee::Employee},
    models::CreateEmployee,
    service::{self, employee::EmployeeRecord},
};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

/// Employee with its attendance history, newest day first.
#[derive(Serialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "E1",
        "full_name": "Jane Doe",
        "email": "jane@x.com",
        "department": "Eng",
        "attendances": [
            { "id": 1, "employee_id": 1, "date": "2024-03-01", "status": "present" }
        ]
    })
)]
pub struct EmployeeDetailResponse {
    pub id: i64,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub attendances: Vec<Attendance>,
}

impl From<EmployeeRecord> for EmployeeDetailResponse {
    fn from(record: EmployeeRecord) -> Self {
        let EmployeeRecord {
            employee,
            mut attendances,
        } = record;
        attendances.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            id: employee.id,
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            email: employee.email,
            department: employee.department,
            attendances,
        }
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "employee_id or email already taken", body = Object, example = json!({
            "detail": "Employee with ID 'E1' already exists",
            "field": "employee_id"
        })),
        (status = 422, description = "Invalid input", body = Object, example = json!({
            "detail": [{ "field": "email", "message": "value is not a valid email address" }]
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> AppResult<HttpResponse> {
    let employee = service::employee::create_employee(pool.get_ref(), payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, without attendance", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> AppResult<HttpResponse> {
    let employees = service::employee::list_employees(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id" = i64, Path, description = "Employee surrogate id")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDetailResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID 1 not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let record = service::employee::get_employee(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(EmployeeDetailResponse::from(record)))
}

/// Delete Employee and all of its attendance
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id" = i64, Path, description = "Employee surrogate id")
    ),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID 1 not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    service::employee::delete_employee(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Attendance statistics for one employee
#[utoipa::path(
    get,
    path = "/api/employees/{id}/stats",
    params(
        ("id" = i64, Path, description = "Employee surrogate id")
    ),
    responses(
        (status = 200, description = "Stats over the whole history", body = EmployeeStats),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn employee_stats(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let stats = service::stats::employee_stats(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(stats))
}
