//! HTTP-level tests for the tasks router backed by an in-memory repository.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use domain_tasks::{
    CreateTask, Task, TaskError, TaskRepository, TaskResult, TaskService, UpdateTask, handlers,
};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;
use tower::ServiceExt;

/// In-memory TaskRepository used to exercise the full handler stack
/// without a running MongoDB.
struct InMemoryRepository {
    tasks: Mutex<Vec<Task>>,
}

impl InMemoryRepository {
    fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let task = Task::new(input);
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn get_by_id(&self, id: ObjectId) -> TaskResult<Option<Task>> {
        let hex = id.to_hex();
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == hex)
            .cloned())
    }

    async fn list(&self, skip: u64, limit: i64) -> TaskResult<Vec<Task>> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .skip(skip as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: ObjectId, input: UpdateTask) -> TaskResult<Task> {
        let hex = id.to_hex();
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == hex)
            .ok_or_else(|| TaskError::NotFound(hex.clone()))?;
        task.apply_update(input);
        Ok(task.clone())
    }

    async fn delete(&self, id: ObjectId) -> TaskResult<()> {
        let hex = id.to_hex();
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != hex);
        if tasks.len() == before {
            return Err(TaskError::NotFound(hex));
        }
        Ok(())
    }

    async fn count(&self) -> TaskResult<u64> {
        Ok(self.tasks.lock().unwrap().len() as u64)
    }

    async fn exists_by_title(&self, title: &str) -> TaskResult<bool> {
        Ok(self.tasks.lock().unwrap().iter().any(|t| t.title == title))
    }

    async fn ensure_indexes(&self) -> TaskResult<()> {
        Ok(())
    }
}

fn app() -> Router {
    let service = TaskService::new(InMemoryRepository::new());
    handlers::router(service)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_task(app: &Router, title: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            serde_json::json!({"title": title, "description": "some work"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_create_returns_201_with_task() {
    let app = app();
    let task = create_task(&app, "Write report").await;

    assert_eq!(task["title"], "Write report");
    assert_eq!(task["status"], "pending");
    assert_eq!(task["_id"].as_str().unwrap().len(), 24);
}

#[tokio::test]
async fn test_create_duplicate_title_returns_409() {
    let app = app();
    create_task(&app, "Write report").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            serde_json::json!({"title": "Write report", "description": "again"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Task with this title already exists");
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_create_empty_title_returns_400() {
    let app = app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            serde_json::json!({"title": "", "description": "x"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_invalid_id_returns_400() {
    let app = app();
    let response = app.oneshot(get_request("/not-an-id")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let app = app();
    let response = app
        .oneshot(get_request("/64b7f3a2c9e77b0012345678"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Task with ID 64b7f3a2c9e77b0012345678 not found"
    );
}

#[tokio::test]
async fn test_get_by_id_returns_task() {
    let app = app();
    let created = create_task(&app, "Read a book").await;
    let id = created["_id"].as_str().unwrap();

    let response = app.oneshot(get_request(&format!("/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Read a book");
}

#[tokio::test]
async fn test_list_defaults_to_first_five() {
    let app = app();
    for i in 0..7 {
        create_task(&app, &format!("task {i}")).await;
    }

    let response = app.clone().oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tasks"].as_array().unwrap().len(), 5);
    assert_eq!(body["total"], 7);
    assert_eq!(body["tasks"][0]["title"], "task 0");
}

#[tokio::test]
async fn test_list_second_page() {
    let app = app();
    for i in 0..7 {
        create_task(&app, &format!("task {i}")).await;
    }

    let response = app
        .clone()
        .oneshot(get_request("/?page=2&limit=5"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "task 5");
    assert_eq!(body["total"], 7);
}

#[tokio::test]
async fn test_patch_updates_status() {
    let app = app();
    let created = create_task(&app, "Fix the sink").await;
    let id = created["_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{id}"),
            serde_json::json!({"status": "completed"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["title"], "Fix the sink");
}

#[tokio::test]
async fn test_patch_duplicate_title_returns_409() {
    let app = app();
    create_task(&app, "first").await;
    let created = create_task(&app, "second").await;
    let id = created["_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{id}"),
            serde_json::json!({"title": "first"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_returns_confirmation_then_404() {
    let app = app();
    let created = create_task(&app, "Throw away").await;
    let id = created["_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Task deleted successfully");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
