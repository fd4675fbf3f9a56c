use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    #[error("Task with ID {0} not found")]
    NotFound(String),

    #[error("Task with this title already exists")]
    DuplicateTitle(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::InvalidId(id) => AppError::InvalidId(format!("Invalid ID format: {}", id)),
            TaskError::NotFound(id) => AppError::NotFound(format!("Task with ID {} not found", id)),
            TaskError::DuplicateTitle(_) => {
                AppError::Conflict("Task with this title already exists".to_string())
            }
            TaskError::Validation(msg) => AppError::BadRequest(msg),
            TaskError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for TaskError {
    fn from(err: mongodb::error::Error) -> Self {
        TaskError::Database(err.to_string())
    }
}
