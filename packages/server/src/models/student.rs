use serde::{Deserialize, Serialize};

use crate::entity::student;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateStudentRequest {
    #[schema(example = "Harry")]
    pub name: String,
    #[schema(example = 15)]
    pub age: i32,
    /// Faculty the student belongs to, if any.
    #[schema(example = 1)]
    #[serde(default)]
    pub faculty_id: Option<i32>,
}

/// Full-record update. Without `id` a new student is created; a missing
/// `faculty_id` detaches the student from its faculty.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateStudentRequest {
    #[schema(example = 1)]
    pub id: Option<i32>,
    #[schema(example = "Harry")]
    pub name: String,
    #[schema(example = 16)]
    pub age: i32,
    #[schema(example = 1)]
    #[serde(default)]
    pub faculty_id: Option<i32>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StudentResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Harry")]
    pub name: String,
    #[schema(example = 15)]
    pub age: i32,
    #[schema(example = 1)]
    pub faculty_id: Option<i32>,
}

/// Inclusive age range. Reversed bounds select nothing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct AgeRangeQuery {
    #[param(example = 11)]
    pub start_age: i32,
    #[param(example = 17)]
    pub end_age: i32,
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            age: m.age,
            faculty_id: m.faculty_id,
        }
    }
}
