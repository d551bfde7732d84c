use crate::model::attendance::AttendanceStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "E1", min_length = 1, max_length = 50)]
    pub employee_id: String,

    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Jane Doe", min_length = 1, max_length = 100)]
    pub full_name: String,

    #[validate(email)]
    #[schema(example = "jane@x.com", format = "email", value_type = String)]
    pub email: String,

    #[validate(length(min = 1, max = 50))]
    #[schema(example = "Eng", min_length = 1, max_length = 50)]
    pub department: String,
}

impl CreateEmployee {
    /// Strips surrounding whitespace so that blank values fail the length rules,
    /// and lowercases the email domain so one mailbox has one spelling.
    pub fn trimmed(self) -> Self {
        Self {
            employee_id: self.employee_id.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            email: normalize_email(self.email.trim()),
            department: self.department.trim().to_string(),
        }
    }
}

// Domains are case-insensitive, local parts are left as written.
fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "present")]
    pub status: AttendanceStatus,
}

/// `?employee_id=` on POST /attendance
#[derive(Debug, Deserialize)]
pub struct EmployeeRef {
    pub employee_id: i64,
}

/// Inclusive bounds for an employee's attendance history
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct DateFilter {
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> CreateEmployee {
        CreateEmployee {
            employee_id: "E1".into(),
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            department: "Eng".into(),
        }
    }

    #[test]
    fn accepts_well_formed_employee() {
        assert!(jane().validate().is_ok());
    }

    #[test]
    fn rejects_blank_fields_after_trimming() {
        let input = CreateEmployee {
            full_name: "   ".into(),
            ..jane()
        }
        .trimmed();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
    }

    #[test]
    fn enforces_length_bounds() {
        let input = CreateEmployee {
            employee_id: "x".repeat(51),
            department: "d".repeat(50),
            ..jane()
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("employee_id"));
        assert!(!fields.contains_key("department"));
    }

    #[test]
    fn lowercases_email_domain_only() {
        let input = CreateEmployee {
            email: " Jane.Doe@Example.COM ".into(),
            ..jane()
        }
        .trimmed();
        assert_eq!(input.email, "Jane.Doe@example.com");

        let input = CreateEmployee {
            email: "no-at-sign".into(),
            ..jane()
        }
        .trimmed();
        assert_eq!(input.email, "no-at-sign");
    }

    #[test]
    fn rejects_malformed_email() {
        let input = CreateEmployee {
            email: "not-an-email".into(),
            ..jane()
        };
        assert!(input.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn attendance_body_requires_calendar_date() {
        let ok: MarkAttendance =
            serde_json::from_str(r#"{"date":"2024-02-29","status":"absent"}"#).unwrap();
        assert_eq!(ok.status, AttendanceStatus::Absent);
        assert!(serde_json::from_str::<MarkAttendance>(r#"{"date":"2023-02-29","status":"absent"}"#).is_err());
        assert!(serde_json::from_str::<MarkAttendance>(r#"{"date":"2024-03-01T10:00:00","status":"present"}"#).is_err());
    }
}
