//! Server setup and lifecycle management.
//!
//! Provides router construction with OpenAPI documentation, health check
//! endpoints, and graceful shutdown coordination.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_production_app, create_router};
pub use health::{HealthResponse, health_handler, health_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
