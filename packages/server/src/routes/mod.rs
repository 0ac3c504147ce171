use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::{avatar, faculty, student};
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(faculty_routes())
        .merge(student_routes())
        .merge(avatar_routes(config))
}

fn faculty_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(faculty::create_faculty, faculty::update_faculty))
        .routes(routes!(faculty::list_faculties))
        .routes(routes!(faculty::find_faculties_by_color_or_name))
        .routes(routes!(faculty::list_faculty_students))
        .routes(routes!(faculty::get_faculty, faculty::delete_faculty))
}

fn student_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(student::create_student, student::update_student))
        .routes(routes!(student::list_students))
        .routes(routes!(student::find_students_by_age))
        .routes(routes!(student::get_student_faculty))
        .routes(routes!(student::get_student, student::delete_student))
}

fn avatar_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(avatar::upload_avatar, avatar::get_avatar))
        .routes(routes!(avatar::preview_avatar))
        .routes(routes!(avatar::download_avatar))
        .layer(avatar::avatar_upload_body_limit(
            config.storage.max_avatar_size,
        ))
}
