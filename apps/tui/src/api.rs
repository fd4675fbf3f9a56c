//! HTTP client for the Taskboard API.

use domain_tasks::{CreateTask, DeleteConfirmation, Task, TaskPage, UpdateTask};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned by the server for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Thin typed wrapper over the Taskboard REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a response into `T`, surfacing the server's error message
    /// for non-2xx statuses.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => format!("server returned {}", status),
        };
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch one page of tasks.
    pub async fn list_tasks(&self, page: u64, limit: i64) -> ApiResult<TaskPage> {
        let response = self
            .http
            .get(self.url("/tasks"))
            .query(&[("page", page.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Fetch a single task by ID.
    pub async fn get_task(&self, id: &str) -> ApiResult<Task> {
        let response = self.http.get(self.url(&format!("/tasks/{id}"))).send().await?;
        Self::decode(response).await
    }

    /// Create a new task.
    pub async fn create_task(&self, input: &CreateTask) -> ApiResult<Task> {
        let response = self
            .http
            .post(self.url("/tasks"))
            .json(input)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Partially update a task.
    pub async fn update_task(&self, id: &str, input: &UpdateTask) -> ApiResult<Task> {
        let response = self
            .http
            .patch(self.url(&format!("/tasks/{id}")))
            .json(input)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Delete a task.
    pub async fn delete_task(&self, id: &str) -> ApiResult<DeleteConfirmation> {
        let response = self
            .http
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }
}
