//! Tasks API routes
//!
//! This module wires up the tasks domain to HTTP routes.

use axum::Router;
use domain_tasks::{MongoTaskRepository, TaskRepository, TaskResult, TaskService, handlers};
use mongodb::Database;

use crate::state::AppState;

/// Create tasks router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoTaskRepository::new(state.db.clone());

    // Create the service
    let service = TaskService::new(repository);

    // Return the domain's router
    handlers::router(service)
}

/// Create the indexes the tasks collection relies on
pub async fn init_indexes(db: &Database) -> TaskResult<()> {
    let repository = MongoTaskRepository::new(db.clone());
    repository.ensure_indexes().await
}
