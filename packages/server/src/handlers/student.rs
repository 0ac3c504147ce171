use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::faculty::FacultyResponse;
use crate::models::student::*;
use crate::services::{avatar_service, student_service};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/student",
    tag = "Students",
    operation_id = "createStudent",
    summary = "Create a student",
    description = "Persists a new student. `faculty_id` is optional but must name an existing \
        faculty when present.",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = student_service(&state.db).add(payload).await?;
    Ok((StatusCode::CREATED, Json(StudentResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/student",
    tag = "Students",
    operation_id = "updateStudent",
    summary = "Update a student",
    description = "Overwrites all fields of the student identified by `id`. A body without `id` \
        creates a new student.",
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Student or faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = ?payload.id))]
pub async fn update_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    let model = student_service(&state.db).update(payload).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/student/{id}",
    tag = "Students",
    operation_id = "getStudent",
    summary = "Get a student by ID",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let model = student_service(&state.db).get(id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/student/{id}",
    tag = "Students",
    operation_id = "deleteStudent",
    summary = "Delete a student",
    description = "Deletes the student together with its avatar and returns the student as it \
        was before deletion.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Deleted student", body = StudentResponse),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let removed = student_service(&state.db).remove(id).await?;

    if let Some(path) = removed.avatar_file_path {
        avatar_service(&state.db, &*state.avatar_store)
            .discard_file(&path)
            .await;
    }

    Ok(Json(removed.student.into()))
}

#[utoipa::path(
    get,
    path = "/student/by-age",
    tag = "Students",
    operation_id = "findStudentsByAge",
    summary = "Find students within an age range",
    description = "Returns students whose age lies in `[startAge, endAge]`, bounds included. \
        Reversed bounds yield an empty list.",
    params(AgeRangeQuery),
    responses(
        (status = 200, description = "Students in range", body = Vec<StudentResponse>),
        (status = 400, description = "Missing or invalid bounds (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn find_students_by_age(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AgeRangeQuery>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let models = student_service(&state.db)
        .get_by_age(query.start_age, query.end_age)
        .await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/student/all",
    tag = "Students",
    operation_id = "listStudents",
    summary = "List all students",
    responses(
        (status = 200, description = "All students ordered by id", body = Vec<StudentResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let models = student_service(&state.db).get_all().await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/student/faculty/{id}",
    tag = "Students",
    operation_id = "getStudentFaculty",
    summary = "Get the faculty of a student",
    description = "Returns the student's faculty, or `null` when the student has none.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Faculty of the student, or null", body = FacultyResponse),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_student_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<FacultyResponse>>, AppError> {
    let faculty = student_service(&state.db).get_faculty_of_student(id).await?;
    Ok(Json(faculty.map(Into::into)))
}
