use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Task lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has not been started
    #[default]
    Pending,
    /// Task is being worked on
    InProgress,
    /// Task is done
    Completed,
}

/// Task entity - represents a task stored in MongoDB
///
/// The identifier is a 24-character lowercase hex string, serialized
/// as `_id` to match the stored document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Task title
    pub title: String,
    /// Task description
    pub description: String,
    /// Current status
    pub status: TaskStatus,
}

/// DTO for creating a new task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
}

/// DTO for partially updating an existing task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// Pagination parameters for listing tasks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct Page {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Maximum number of tasks per page
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    5
}

impl Default for Page {
    fn default() -> Self {
        Self { page: 1, limit: 5 }
    }
}

impl Page {
    /// Number of documents to skip before this page starts.
    ///
    /// Page numbers below 1 are clamped to the first page; the
    /// multiplication saturates so absurd page numbers cannot overflow.
    pub fn skip(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit.max(0) as u64)
    }
}

/// One page of tasks plus the total collection count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub total: u64,
}

/// Response body for a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl DeleteConfirmation {
    pub fn deleted() -> Self {
        Self {
            message: "Task deleted successfully".to_string(),
        }
    }
}

impl Task {
    /// Create a new task from CreateTask DTO
    pub fn new(input: CreateTask) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            title: input.title,
            description: input.description,
            status: input.status,
        }
    }

    /// Apply updates from UpdateTask DTO
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_task_id_serializes_as_underscore_id() {
        let task = Task {
            id: "64b7f3a2c9e77b0012345678".to_string(),
            title: "Write docs".to_string(),
            description: "Cover the API".to_string(),
            status: TaskStatus::Pending,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["_id"], "64b7f3a2c9e77b0012345678");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_new_task_gets_hex_id() {
        let task = Task::new(CreateTask {
            title: "t".to_string(),
            description: "d".to_string(),
            status: TaskStatus::default(),
        });
        assert_eq!(task.id.len(), 24);
        assert!(task.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn test_create_task_defaults_status() {
        let input: CreateTask =
            serde_json::from_str(r#"{"title":"a","description":"b"}"#).unwrap();
        assert_eq!(input.status, TaskStatus::Pending);
    }

    #[test]
    fn test_page_defaults() {
        let page: Page = serde_json::from_str("{}").unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 5);
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn test_page_skip() {
        let page = Page { page: 3, limit: 5 };
        assert_eq!(page.skip(), 10);

        let zero = Page { page: 0, limit: 5 };
        assert_eq!(zero.skip(), 0);
    }

    #[test]
    fn test_page_skip_saturates_on_huge_page() {
        let page = Page {
            page: u64::MAX,
            limit: 5,
        };
        assert_eq!(page.skip(), u64::MAX);

        let negative_limit = Page { page: 2, limit: -1 };
        assert_eq!(negative_limit.skip(), 0);
    }

    #[test]
    fn test_apply_update_partial() {
        let mut task = Task::new(CreateTask {
            title: "old".to_string(),
            description: "desc".to_string(),
            status: TaskStatus::Pending,
        });
        task.apply_update(UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        });
        assert_eq!(task.title, "old");
        assert_eq!(task.status, TaskStatus::Completed);
    }
}
