use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// System-wide figures for the current calendar day. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "total_employees": 10,
        "total_present_today": 7,
        "total_absent_today": 2,
        "attendance_rate": 70.0
    })
)]
pub struct DashboardStats {
    pub total_employees: i64,
    pub total_present_today: i64,
    pub total_absent_today: i64,
    /// present today / total employees, as a percentage
    pub attendance_rate: f64,
}

/// Figures over one employee's whole attendance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": 1,
        "total_days": 1,
        "present_days": 1,
        "absent_days": 0,
        "attendance_rate": 100.0
    })
)]
pub struct EmployeeStats {
    /// Surrogate id of the employee
    pub employee_id: i64,
    pub total_days: i64,
    pub present_days: i64,
    pub absent_days: i64,
    /// present days / recorded days, as a percentage
    pub attendance_rate: f64,
}

/// `part / whole * 100` rounded to two decimals; 0.0 when `whole` is zero.
pub fn attendance_rate(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    let rate = part as f64 / whole as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}
