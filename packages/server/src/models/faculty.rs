use serde::{Deserialize, Serialize};

use crate::entity::faculty;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateFacultyRequest {
    #[schema(example = "Gryffindor")]
    pub name: String,
    #[schema(example = "Red")]
    pub color: String,
}

/// Full-record update. Without `id` a new faculty is created.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateFacultyRequest {
    #[schema(example = 1)]
    pub id: Option<i32>,
    #[schema(example = "Gryffindor")]
    pub name: String,
    #[schema(example = "Scarlet")]
    pub color: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FacultyResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Gryffindor")]
    pub name: String,
    #[schema(example = "Red")]
    pub color: String,
}

/// Query parameters for the name/color lookup. Both are optional; an absent
/// parameter matches nothing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ColorOrNameQuery {
    /// Faculty name, compared case-insensitively.
    #[param(example = "gryffindor")]
    pub name: Option<String>,
    /// Faculty color, compared case-insensitively.
    #[param(example = "red")]
    pub color: Option<String>,
}

impl From<faculty::Model> for FacultyResponse {
    fn from(m: faculty::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            color: m.color,
        }
    }
}
