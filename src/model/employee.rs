use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored employee; also the listing (summary) shape returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "E1",
        "full_name": "Jane Doe",
        "email": "jane@x.com",
        "department": "Eng"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "E1")]
    pub employee_id: String,

    #[schema(example = "Jane Doe")]
    pub full_name: String,

    #[schema(example = "jane@x.com")]
    pub email: String,

    #[schema(example = "Eng")]
    pub department: String,
}
