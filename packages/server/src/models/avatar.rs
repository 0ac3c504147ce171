use serde::Serialize;

use crate::entity::avatar;

/// Avatar metadata. The image bytes are served by the preview and file
/// endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AvatarResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub student_id: i32,
    /// Server-local path of the stored file.
    #[schema(example = "./avatars/1_Harry.png")]
    pub file_path: String,
    /// File size in bytes.
    #[schema(example = 142857)]
    pub file_size: i64,
    #[schema(example = "image/png")]
    pub media_type: String,
}

impl From<avatar::Model> for AvatarResponse {
    fn from(m: avatar::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            file_path: m.file_path,
            file_size: m.file_size,
            media_type: m.media_type,
        }
    }
}
