use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task, UpdateTask};

/// Repository trait for Task persistence
///
/// This trait defines the data access interface for tasks.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: ObjectId) -> TaskResult<Option<Task>>;

    /// List tasks in insertion order, skipping `skip` documents and
    /// returning at most `limit`
    async fn list(&self, skip: u64, limit: i64) -> TaskResult<Vec<Task>>;

    /// Update an existing task
    async fn update(&self, id: ObjectId, input: UpdateTask) -> TaskResult<Task>;

    /// Delete a task by ID, failing with `NotFound` when it does not exist
    async fn delete(&self, id: ObjectId) -> TaskResult<()>;

    /// Count all tasks in the collection
    async fn count(&self) -> TaskResult<u64>;

    /// Check if a task with this title exists
    async fn exists_by_title(&self, title: &str) -> TaskResult<bool>;

    /// Create the indexes this repository relies on
    async fn ensure_indexes(&self) -> TaskResult<()>;
}
