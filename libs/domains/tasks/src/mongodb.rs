//! MongoDB implementation of TaskRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// MongoDB implementation of the TaskRepository
pub struct MongoTaskRepository {
    collection: Collection<Task>,
}

impl MongoTaskRepository {
    /// Create a new MongoTaskRepository
    ///
    /// # Arguments
    /// * `db` - MongoDB database instance
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("mydb");
    /// let repo = MongoTaskRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Task>("tasks");
        Self { collection }
    }

    /// Create a new MongoTaskRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Task>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Task> {
        &self.collection
    }

    /// True when the error is a unique index violation (code 11000)
    fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
            _ => false,
        }
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let task = Task::new(input);

        self.collection.insert_one(&task).await.map_err(|e| {
            if Self::is_duplicate_key(&e) {
                TaskError::DuplicateTitle(task.title.clone())
            } else {
                TaskError::from(e)
            }
        })?;

        tracing::info!(task_id = %task.id, "Task created successfully");
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> TaskResult<Option<Task>> {
        let filter = doc! { "_id": id.to_hex() };
        let task = self.collection.find_one(filter).await?;
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn list(&self, skip: u64, limit: i64) -> TaskResult<Vec<Task>> {
        use futures_util::TryStreamExt;

        let options = mongodb::options::FindOptions::builder()
            .skip(skip)
            .limit(limit)
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await?;
        let tasks: Vec<Task> = cursor.try_collect().await?;

        Ok(tasks)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: UpdateTask) -> TaskResult<Task> {
        // First, get the existing task
        let filter = doc! { "_id": id.to_hex() };
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_hex()))?;

        // Apply updates
        let mut updated = existing;
        updated.apply_update(input);

        // Replace the document
        self.collection
            .replace_one(filter, &updated)
            .await
            .map_err(|e| {
                if Self::is_duplicate_key(&e) {
                    TaskError::DuplicateTitle(updated.title.clone())
                } else {
                    TaskError::from(e)
                }
            })?;

        tracing::info!(task_id = %id, "Task updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> TaskResult<()> {
        let filter = doc! { "_id": id.to_hex() };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Err(TaskError::NotFound(id.to_hex()));
        }

        tracing::info!(task_id = %id, "Task deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> TaskResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn exists_by_title(&self, title: &str) -> TaskResult<bool> {
        let filter = doc! { "title": title };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn ensure_indexes(&self) -> TaskResult<()> {
        // Unique title index backs the duplicate check under concurrent creates
        let index = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Ensured unique index on tasks.title");
        Ok(())
    }
}
