use common::storage::{BoxReader, FileStore};
use sea_orm::*;
use tracing::{info, warn};

use super::student::find_student;
use crate::entity::{avatar, student};
use crate::error::AppError;
use crate::utils::filename::{avatar_file_name, resolve_media_type, stored_file_name};

/// An uploaded avatar image as received from the client.
#[derive(Debug)]
pub struct AvatarUpload {
    /// File name supplied by the client; only its extension is kept.
    pub file_name: String,
    /// Declared content type of the upload, if any.
    pub media_type: Option<String>,
    pub data: Vec<u8>,
}

pub struct AvatarService<'a, C: ConnectionTrait> {
    conn: &'a C,
    store: &'a dyn FileStore,
}

impl<'a, C: ConnectionTrait> AvatarService<'a, C> {
    pub fn new(conn: &'a C, store: &'a dyn FileStore) -> Self {
        Self { conn, store }
    }

    /// Store the upload as the student's avatar, replacing any previous one.
    /// The caller has already loaded the student.
    ///
    /// The bytes are written to `{student_id}_{student_name}.{ext}` in the
    /// avatar directory and duplicated into the avatar record. A previous
    /// file under a different name is removed afterwards.
    pub async fn upload_avatar(
        &self,
        student: &student::Model,
        upload: AvatarUpload,
    ) -> Result<avatar::Model, AppError> {
        let student_id = student.id;

        if upload.data.is_empty() {
            return Err(AppError::Validation("Avatar file must not be empty".into()));
        }

        let file_name = avatar_file_name(student_id, &student.name, &upload.file_name);
        let media_type = resolve_media_type(upload.media_type.as_deref(), &upload.file_name);

        let stored = self.store.put(&file_name, &upload.data).await?;
        let file_path = stored.path.to_string_lossy().into_owned();

        let existing = avatar::Entity::find()
            .filter(avatar::Column::StudentId.eq(student_id))
            .one(self.conn)
            .await?;
        let previous_path = existing.as_ref().map(|a| a.file_path.clone());

        let mut active: avatar::ActiveModel = match existing {
            Some(model) => model.into(),
            None => avatar::ActiveModel {
                student_id: Set(student_id),
                ..Default::default()
            },
        };
        active.file_path = Set(file_path.clone());
        active.file_size = Set(stored.size as i64);
        active.media_type = Set(media_type);
        active.data = Set(upload.data);

        let model = if previous_path.is_some() {
            active.update(self.conn).await?
        } else {
            active.insert(self.conn).await?
        };

        if let Some(previous) = previous_path.filter(|p| *p != file_path) {
            self.discard_file(&previous).await;
        }

        info!(
            student_id,
            avatar_id = model.id,
            size = model.file_size,
            "Avatar stored"
        );
        Ok(model)
    }

    pub async fn find_avatar(&self, student_id: i32) -> Result<avatar::Model, AppError> {
        find_student(self.conn, student_id).await?;

        avatar::Entity::find()
            .filter(avatar::Column::StudentId.eq(student_id))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Avatar not found".into()))
    }

    /// Open the stored avatar file for streaming.
    pub async fn read_avatar_file(
        &self,
        student_id: i32,
    ) -> Result<(avatar::Model, BoxReader), AppError> {
        let avatar = self.find_avatar(student_id).await?;
        let name = stored_file_name(&avatar.file_path)
            .ok_or_else(|| AppError::NotFound("Avatar file not found".into()))?;
        let reader = self.store.get_stream(name).await?;
        Ok((avatar, reader))
    }

    /// Remove an avatar file that is no longer referenced. Failures are logged
    /// and otherwise ignored.
    pub async fn discard_file(&self, file_path: &str) {
        let Some(name) = stored_file_name(file_path) else {
            return;
        };
        match self.store.delete(name).await {
            Ok(true) => info!(file_path, "Avatar file removed"),
            Ok(false) => {}
            Err(e) => warn!(file_path, error = %e, "Failed to remove avatar file"),
        }
    }
}

pub fn avatar_service<'a>(
    db: &'a DatabaseConnection,
    store: &'a dyn FileStore,
) -> AvatarService<'a, DatabaseConnection> {
    AvatarService::new(db, store)
}
