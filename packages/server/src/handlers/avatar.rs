use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, body::Body};
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::avatar::AvatarResponse;
use crate::services::{AvatarUpload, avatar_service};
use crate::services::student::find_student;
use crate::state::AppState;

/// Room left for multipart framing and other form fields.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn avatar_upload_body_limit(max_avatar_size: u64) -> DefaultBodyLimit {
    let limit = max_avatar_size.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    post,
    path = "/avatar/{student_id}",
    tag = "Avatars",
    operation_id = "uploadAvatar",
    summary = "Upload a student's avatar",
    description = "Stores the `file` multipart field as the student's avatar. The image is saved \
        as `{student_id}_{student_name}.{ext}` in the avatar directory and its bytes are kept in \
        the database as well. Re-uploading replaces the previous avatar.",
    params(("student_id" = i32, Path, description = "Student ID")),
    request_body(content_type = "multipart/form-data", description = "Avatar image in the `file` field"),
    responses(
        (status = 201, description = "Avatar stored", body = AvatarResponse),
        (status = 400, description = "Missing, empty or oversized file (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Writing the file failed (IO_FAILURE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    // Unknown students are rejected before the body is read.
    let student = find_student(&state.db, student_id).await?;

    let mut upload: Option<AvatarUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let media_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

        upload = Some(AvatarUpload {
            file_name,
            media_type,
            data: data.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let model = avatar_service(&state.db, &*state.avatar_store)
        .upload_avatar(&student, upload)
        .await?;

    Ok((StatusCode::CREATED, Json(AvatarResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/avatar/{student_id}",
    tag = "Avatars",
    operation_id = "getAvatar",
    summary = "Get a student's avatar metadata",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Avatar metadata", body = AvatarResponse),
        (status = 404, description = "Student or avatar not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_avatar(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Json<AvatarResponse>, AppError> {
    let model = avatar_service(&state.db, &*state.avatar_store)
        .find_avatar(student_id)
        .await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/avatar/{student_id}/preview",
    tag = "Avatars",
    operation_id = "previewAvatar",
    summary = "Get the avatar image from the database",
    description = "Returns the image bytes kept in the avatar record.",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Avatar image"),
        (status = 404, description = "Student or avatar not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn preview_avatar(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let avatar = avatar_service(&state.db, &*state.avatar_store)
        .find_avatar(student_id)
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &avatar.media_type)
        .header(header::CONTENT_LENGTH, avatar.data.len().to_string())
        .body(Body::from(avatar.data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

#[utoipa::path(
    get,
    path = "/avatar/{student_id}/file",
    tag = "Avatars",
    operation_id = "downloadAvatar",
    summary = "Download the avatar file from disk",
    description = "Streams the avatar file stored in the avatar directory.",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Avatar image"),
        (status = 404, description = "Student, avatar or file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn download_avatar(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let (avatar, reader) = avatar_service(&state.db, &*state.avatar_store)
        .read_avatar_file(student_id)
        .await?;

    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &avatar.media_type)
        .header(header::CONTENT_LENGTH, avatar.file_size.to_string())
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
