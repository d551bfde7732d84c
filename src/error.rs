use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

pub type AppResult<T> = Result<T, AppError>;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "value is not a valid email address")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Employee columns that must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueField {
    EmployeeId,
    Email,
}

impl UniqueField {
    fn label(&self) -> &'static str {
        match self {
            UniqueField::EmployeeId => "ID",
            UniqueField::Email => "email",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("Employee with {} '{value}' already exists", .field.label())]
    DuplicateKey { field: UniqueField, value: String },

    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    pub fn employee_not_found(id: i64) -> Self {
        AppError::NotFound {
            resource: "Employee",
            id,
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        AppError::Internal(value.into())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = value
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();
                errors
                    .iter()
                    .map(move |e| FieldError::new(field.clone(), describe(e)))
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(fields)
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match err.code.as_ref() {
        "length" => {
            let min = err.params.get("min").and_then(|v| v.as_u64());
            let max = err.params.get("max").and_then(|v| v.as_u64());
            match (min, max) {
                (Some(min), Some(max)) => {
                    format!("length must be between {min} and {max} characters")
                }
                (Some(min), None) => format!("length must be at least {min} characters"),
                (None, Some(max)) => format!("length must be at most {max} characters"),
                (None, None) => "invalid length".to_string(),
            }
        }
        "email" => "value is not a valid email address".to_string(),
        code => format!("failed {code} check"),
    }
}

impl From<JsonPayloadError> for AppError {
    fn from(value: JsonPayloadError) -> Self {
        AppError::invalid("body", value.to_string())
    }
}

impl From<QueryPayloadError> for AppError {
    fn from(value: QueryPayloadError) -> Self {
        AppError::invalid("query", value.to_string())
    }
}

impl From<PathError> for AppError {
    fn from(value: PathError) -> Self {
        AppError::invalid("path", value.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DuplicateKey { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(fields) => json!({ "detail": fields }),
            AppError::DuplicateKey { field, .. } => json!({
                "detail": self.to_string(),
                "field": field,
            }),
            AppError::NotFound { .. } => json!({ "detail": self.to_string() }),
            AppError::Internal(e) => {
                error!(error = ?e, "Request failed");
                json!({ "detail": "Internal Server Error" })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn internal_errors_are_masked() {
        let (status, body) = body_of(AppError::from(anyhow::anyhow!("disk on fire"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Internal Server Error" }));
    }

    #[actix_web::test]
    async fn duplicate_key_names_the_field() {
        let err = AppError::DuplicateKey {
            field: UniqueField::Email,
            value: "jane@x.com".into(),
        };
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "email");
        assert_eq!(body["detail"], "Employee with email 'jane@x.com' already exists");
    }

    #[actix_web::test]
    async fn not_found_carries_the_id() {
        let (status, body) = body_of(AppError::employee_not_found(42)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Employee with ID 42 not found");
    }

    #[actix_web::test]
    async fn validation_lists_fields() {
        let (status, body) = body_of(AppError::invalid("date", "bad date")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "date");
        assert_eq!(body["detail"][0]["message"], "bad date");
    }
}
