//! API routes module
//!
//! This module defines all HTTP API routes for the Taskboard API.

pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Create all API routes, mounted at the application root
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/tasks", tasks::router(state))
        .merge(health::router(state.clone()))
}
