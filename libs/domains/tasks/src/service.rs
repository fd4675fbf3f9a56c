//! Task Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, DeleteConfirmation, Page, Task, TaskPage, UpdateTask};
use crate::repository::TaskRepository;

/// Task service providing business logic operations
///
/// The service layer handles validation, identifier classification,
/// business rules, and orchestrates repository operations.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Create a new TaskService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Parse a raw path identifier into an ObjectId.
    ///
    /// Anything that is not a valid 24-character hex identifier is
    /// rejected before the repository is touched.
    fn parse_id(id: &str) -> TaskResult<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| TaskError::InvalidId(id.to_string()))
    }

    /// Create a new task
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        // Check for duplicate title
        if self.repository.exists_by_title(&input.title).await? {
            return Err(TaskError::DuplicateTitle(input.title));
        }

        self.repository.create(input).await
    }

    /// Get a task by ID
    #[instrument(skip(self))]
    pub async fn get_task(&self, id: &str) -> TaskResult<Task> {
        let oid = Self::parse_id(id)?;
        self.repository
            .get_by_id(oid)
            .await?
            .ok_or_else(|| TaskError::NotFound(oid.to_hex()))
    }

    /// List one page of tasks along with the total collection count
    #[instrument(skip(self))]
    pub async fn list_tasks(&self, page: Page) -> TaskResult<TaskPage> {
        let tasks = self.repository.list(page.skip(), page.limit).await?;
        let total = self.repository.count().await?;
        Ok(TaskPage { tasks, total })
    }

    /// Update an existing task
    #[instrument(skip(self, input))]
    pub async fn update_task(&self, id: &str, input: UpdateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        let oid = Self::parse_id(id)?;
        let existing = self
            .repository
            .get_by_id(oid)
            .await?
            .ok_or_else(|| TaskError::NotFound(oid.to_hex()))?;

        // Check for duplicate title if the title is being changed
        if let Some(ref new_title) = input.title {
            if new_title != &existing.title && self.repository.exists_by_title(new_title).await? {
                return Err(TaskError::DuplicateTitle(new_title.clone()));
            }
        }

        self.repository.update(oid, input).await
    }

    /// Delete a task
    #[instrument(skip(self))]
    pub async fn remove_task(&self, id: &str) -> TaskResult<DeleteConfirmation> {
        let oid = Self::parse_id(id)?;
        self.repository.delete(oid).await?;
        Ok(DeleteConfirmation::deleted())
    }
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use crate::repository::MockTaskRepository;
    use mockall::predicate::eq;

    fn sample_task(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            status: TaskStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_create_task_rejects_duplicate_title() {
        let mut repo = MockTaskRepository::new();
        repo.expect_exists_by_title()
            .with(eq("Buy milk"))
            .returning(|_| Ok(true));

        let service = TaskService::new(repo);
        let result = service
            .create_task(CreateTask {
                title: "Buy milk".to_string(),
                description: "2 liters".to_string(),
                status: TaskStatus::Pending,
            })
            .await;

        assert!(matches!(result, Err(TaskError::DuplicateTitle(_))));
    }

    #[tokio::test]
    async fn test_create_task_succeeds() {
        let mut repo = MockTaskRepository::new();
        repo.expect_exists_by_title().returning(|_| Ok(false));
        repo.expect_create()
            .returning(|input| Ok(Task::new(input)));

        let service = TaskService::new(repo);
        let task = service
            .create_task(CreateTask {
                title: "Buy milk".to_string(),
                description: "2 liters".to_string(),
                status: TaskStatus::Pending,
            })
            .await
            .unwrap();

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.id.len(), 24);
    }

    #[tokio::test]
    async fn test_create_task_rejects_empty_title() {
        let repo = MockTaskRepository::new();
        let service = TaskService::new(repo);
        let result = service
            .create_task(CreateTask {
                title: String::new(),
                description: "desc".to_string(),
                status: TaskStatus::Pending,
            })
            .await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_task_invalid_id() {
        let repo = MockTaskRepository::new();
        let service = TaskService::new(repo);

        let result = service.get_task("not-a-hex-id").await;
        assert!(matches!(result, Err(TaskError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_get_task_not_found() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = TaskService::new(repo);
        let result = service.get_task("64b7f3a2c9e77b0012345678").await;
        assert!(matches!(result, Err(TaskError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_tasks_returns_page_and_total() {
        let mut repo = MockTaskRepository::new();
        repo.expect_list()
            .with(eq(5u64), eq(5i64))
            .returning(|_, _| {
                Ok(vec![sample_task("64b7f3a2c9e77b0012345678", "a")])
            });
        repo.expect_count().returning(|| Ok(6));

        let service = TaskService::new(repo);
        let page = service
            .list_tasks(Page { page: 2, limit: 5 })
            .await
            .unwrap();

        assert_eq!(page.tasks.len(), 1);
        assert_eq!(page.total, 6);
    }

    #[tokio::test]
    async fn test_update_task_rejects_duplicate_title() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(sample_task(&id.to_hex(), "old title"))));
        repo.expect_exists_by_title()
            .with(eq("taken"))
            .returning(|_| Ok(true));

        let service = TaskService::new(repo);
        let result = service
            .update_task(
                "64b7f3a2c9e77b0012345678",
                UpdateTask {
                    title: Some("taken".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(TaskError::DuplicateTitle(_))));
    }

    #[tokio::test]
    async fn test_update_task_keeps_own_title() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(sample_task(&id.to_hex(), "same"))));
        // exists_by_title is not consulted when the title is unchanged
        repo.expect_update().returning(|id, input| {
            let mut task = sample_task(&id.to_hex(), "same");
            task.apply_update(input);
            Ok(task)
        });

        let service = TaskService::new(repo);
        let task = service
            .update_task(
                "64b7f3a2c9e77b0012345678",
                UpdateTask {
                    title: Some("same".to_string()),
                    status: Some(TaskStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_remove_task_returns_confirmation() {
        let mut repo = MockTaskRepository::new();
        repo.expect_delete().returning(|_| Ok(()));

        let service = TaskService::new(repo);
        let confirmation = service
            .remove_task("64b7f3a2c9e77b0012345678")
            .await
            .unwrap();

        assert_eq!(confirmation.message, "Task deleted successfully");
    }

    #[tokio::test]
    async fn test_remove_task_missing_is_not_found() {
        let mut repo = MockTaskRepository::new();
        repo.expect_delete()
            .returning(|id| Err(TaskError::NotFound(id.to_hex())));

        let service = TaskService::new(repo);
        let result = service.remove_task("64b7f3a2c9e77b0012345678").await;
        assert!(matches!(result, Err(TaskError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_task_invalid_id_skips_repository() {
        let repo = MockTaskRepository::new();
        let service = TaskService::new(repo);

        let result = service.remove_task("123").await;
        assert!(matches!(result, Err(TaskError::InvalidId(_))));
    }
}
