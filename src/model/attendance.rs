use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// Status recorded for one employee on one day.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "date": "2024-03-01",
        "status": "present"
    })
)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: i64,

    /// Surrogate id of the owning employee
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_value(AttendanceStatus::Present).unwrap(), "present");
        assert_eq!(
            serde_json::from_value::<AttendanceStatus>(serde_json::json!("absent")).unwrap(),
            AttendanceStatus::Absent
        );
        assert!(serde_json::from_value::<AttendanceStatus>(serde_json::json!("late")).is_err());
    }

    #[test]
    fn status_text_form_matches_serde() {
        for status in [AttendanceStatus::Present, AttendanceStatus::Absent] {
            assert_eq!(serde_json::to_value(status).unwrap(), status.to_string());
        }
    }
}
