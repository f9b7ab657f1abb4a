mod extract;
mod students;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Route table for the service
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route("/students/bulk", post(students::create_students_bulk))
        .route(
            "/students/:id",
            get(students::get_student)
                .put(students::update_student)
                .patch(students::patch_student)
                .delete(students::delete_student),
        )
}

async fn health_check() -> &'static str {
    "OK"
}
