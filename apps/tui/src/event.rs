//! Event types for communication between the backend task and the UI thread.

use domain_tasks::{CreateTask, Task, TaskPage, UpdateTask};

/// Events sent from the backend task to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// A page of tasks was fetched from the server.
    TasksLoaded(TaskPage),

    /// A task was created on the server.
    TaskCreated(Task),

    /// A task was updated on the server.
    TaskUpdated(Task),

    /// A task was deleted on the server.
    TaskDeleted(String),

    /// A request failed.
    RequestFailed {
        /// Which operation failed (fetch, create, update, delete).
        operation: Operation,
        /// Server or transport error message.
        message: String,
    },
}

/// The request kinds the backend performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

/// Commands sent from the UI thread to the backend task.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch one page of tasks.
    FetchTasks { page: u64, limit: i64 },

    /// Create a new task.
    CreateTask(CreateTask),

    /// Apply a partial update to a task.
    UpdateTask { id: String, input: UpdateTask },

    /// Delete a task.
    DeleteTask(String),

    /// Quit the application.
    Quit,
}
