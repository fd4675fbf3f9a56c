//! Background task that talks to the Taskboard API.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::event::{Command, Operation, UiEvent};

/// Run the backend command loop.
///
/// This function runs in a separate thread with its own tokio runtime.
/// It receives commands from the UI thread, performs the corresponding
/// HTTP requests, and sends the results back via `ui_tx`.
pub async fn run_backend(
    client: ApiClient,
    ui_tx: mpsc::Sender<UiEvent>,
    mut cmd_rx: mpsc::Receiver<Command>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            Command::Quit => {
                info!("Received quit command, shutting down backend");
                break;
            }
            Command::FetchTasks { page, limit } => {
                debug!(page, limit, "Fetching tasks");
                let event = match client.list_tasks(page, limit).await {
                    Ok(tasks) => UiEvent::TasksLoaded(tasks),
                    Err(e) => UiEvent::RequestFailed {
                        operation: Operation::Fetch,
                        message: e.to_string(),
                    },
                };
                let _ = ui_tx.send(event).await;
            }
            Command::CreateTask(input) => {
                debug!(title = %input.title, "Creating task");
                let event = match client.create_task(&input).await {
                    Ok(task) => UiEvent::TaskCreated(task),
                    Err(e) => UiEvent::RequestFailed {
                        operation: Operation::Create,
                        message: e.to_string(),
                    },
                };
                let _ = ui_tx.send(event).await;
            }
            Command::UpdateTask { id, input } => {
                debug!(%id, "Updating task");
                let event = match client.update_task(&id, &input).await {
                    Ok(task) => UiEvent::TaskUpdated(task),
                    Err(e) => UiEvent::RequestFailed {
                        operation: Operation::Update,
                        message: e.to_string(),
                    },
                };
                let _ = ui_tx.send(event).await;
            }
            Command::DeleteTask(id) => {
                debug!(%id, "Deleting task");
                let event = match client.delete_task(&id).await {
                    Ok(_) => UiEvent::TaskDeleted(id),
                    Err(e) => UiEvent::RequestFailed {
                        operation: Operation::Delete,
                        message: e.to_string(),
                    },
                };
                let _ = ui_tx.send(event).await;
            }
        }
    }

    info!("Backend shutdown complete");
}
