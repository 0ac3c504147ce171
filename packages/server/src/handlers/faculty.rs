use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::faculty::*;
use crate::models::student::StudentResponse;
use crate::services::faculty_service;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/faculty",
    tag = "Faculties",
    operation_id = "createFaculty",
    summary = "Create a faculty",
    description = "Persists a new faculty and returns it with its assigned id.",
    request_body = CreateFacultyRequest,
    responses(
        (status = 201, description = "Faculty created", body = FacultyResponse),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_faculty(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateFacultyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = faculty_service(&state.db).add(payload).await?;
    Ok((StatusCode::CREATED, Json(FacultyResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/faculty",
    tag = "Faculties",
    operation_id = "updateFaculty",
    summary = "Update a faculty",
    description = "Overwrites all fields of the faculty identified by `id`. A body without `id` \
        creates a new faculty.",
    request_body = UpdateFacultyRequest,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyResponse),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = ?payload.id))]
pub async fn update_faculty(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateFacultyRequest>,
) -> Result<Json<FacultyResponse>, AppError> {
    let model = faculty_service(&state.db).update(payload).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/faculty/{id}",
    tag = "Faculties",
    operation_id = "getFaculty",
    summary = "Get a faculty by ID",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty", body = FacultyResponse),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let model = faculty_service(&state.db).get(id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/faculty/{id}",
    tag = "Faculties",
    operation_id = "deleteFaculty",
    summary = "Delete a faculty",
    description = "Deletes the faculty and returns it as it was before deletion. Its students \
        stay in place without a faculty.",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Deleted faculty", body = FacultyResponse),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let model = faculty_service(&state.db).remove(id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/faculty/by-color",
    tag = "Faculties",
    operation_id = "findFacultiesByColorOrName",
    summary = "Find faculties by color or name",
    description = "Returns faculties whose name equals `name` or whose color equals `color`, \
        ignoring case. Omitted parameters match nothing.",
    params(ColorOrNameQuery),
    responses(
        (status = 200, description = "Matching faculties", body = Vec<FacultyResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn find_faculties_by_color_or_name(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ColorOrNameQuery>,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    let models = faculty_service(&state.db)
        .get_by_color_or_name(query.name.as_deref(), query.color.as_deref())
        .await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/faculty/all",
    tag = "Faculties",
    operation_id = "listFaculties",
    summary = "List all faculties",
    responses(
        (status = 200, description = "All faculties ordered by id", body = Vec<FacultyResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_faculties(
    State(state): State<AppState>,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    let models = faculty_service(&state.db).get_all().await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/faculty/students/{id}",
    tag = "Faculties",
    operation_id = "listFacultyStudents",
    summary = "List the students of a faculty",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Students of the faculty", body = Vec<StudentResponse>),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_faculty_students(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = faculty_service(&state.db).get_students(id).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}
