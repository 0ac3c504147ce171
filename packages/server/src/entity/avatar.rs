use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "avatar")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// At most one avatar per student.
    #[sea_orm(unique)]
    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,

    /// Server-local path of the file copy.
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,

    /// Same bytes as the file on disk.
    pub data: Vec<u8>,
}

impl ActiveModelBehavior for ActiveModel {}
