use crate::api::employee::EmployeeDetailResponse;
use crate::error::FieldError;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::Employee;
use crate::model::stats::{DashboardStats, EmployeeStats};
use crate::models::{CreateEmployee, MarkAttendance};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## Lightweight Human Resource Management

Tracks employees and their daily attendance, and reports aggregate figures.

### Key Features
- **Employees**: create, list, view (with attendance history) and delete
- **Attendance**: one status per employee per day, re-marking overwrites
- **Dashboard**: today's headcount, present/absent split and attendance rate

### Errors
- `400` duplicate `employee_id` or `email`
- `404` unknown employee
- `422` invalid input, with per-field detail

Dates are plain calendar dates, `YYYY-MM-DD`.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employee_stats,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::list_attendance,

        crate::api::dashboard::dashboard_stats,
        crate::api::dashboard::health
    ),
    components(
        schemas(
            CreateEmployee,
            Employee,
            EmployeeDetailResponse,
            MarkAttendance,
            Attendance,
            AttendanceStatus,
            DashboardStats,
            EmployeeStats,
            FieldError
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Aggregate statistics"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
