//! Application state and main event loop.

use std::time::Duration;

use domain_tasks::{CreateTask, Task, TaskStatus, UpdateTask};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::event::{Command, Operation, UiEvent};
use crate::store::TaskStore;
use crate::views;

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    List,
    Detail,
    Form,
}

/// Which form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Status,
}

/// Whether the form creates a new task or edits an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Add,
    Edit { id: String },
}

/// Editable form state for the add and edit screens.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub focus: FormField,
    /// Inline error shown above the fields (validation or server rejection).
    pub error: Option<String>,
    /// True while a submit is waiting for the server.
    pub submitting: bool,
}

impl TaskForm {
    fn add() -> Self {
        Self {
            mode: FormMode::Add,
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Pending,
            focus: FormField::Title,
            error: None,
            submitting: false,
        }
    }

    fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit {
                id: task.id.clone(),
            },
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            focus: FormField::Title,
            error: None,
            submitting: false,
        }
    }
}

/// Main application: store, navigation state, and pending commands.
pub struct App {
    pub store: TaskStore,
    pub view: View,
    /// Selected row in the filtered list.
    pub selected: usize,
    /// Task shown on the detail screen.
    pub detail: Option<Task>,
    /// Form state when the form screen is open.
    pub form: Option<TaskForm>,
    /// True while the filter input captures keystrokes.
    pub filter_mode: bool,
    /// One-line message for the footer.
    pub status_message: Option<String>,
    outbox: Vec<Command>,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            store: TaskStore::default(),
            view: View::List,
            selected: 0,
            detail: None,
            form: None,
            filter_mode: false,
            status_message: None,
            outbox: Vec::new(),
            should_quit: false,
        }
    }

    /// Queue a fetch of the current page.
    pub fn refresh(&mut self) {
        self.store.fetch_pending();
        self.outbox.push(Command::FetchTasks {
            page: self.store.page,
            limit: self.store.limit,
        });
    }

    /// Drain the commands queued by input handling.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    /// Run the main event loop.
    ///
    /// This runs on the main thread and handles:
    /// - Drawing the UI
    /// - Processing keyboard input
    /// - Receiving updates from the backend
    pub fn run(
        &mut self,
        mut terminal: DefaultTerminal,
        mut ui_rx: mpsc::Receiver<UiEvent>,
        cmd_tx: mpsc::Sender<Command>,
    ) -> std::io::Result<()> {
        self.refresh();

        loop {
            terminal.draw(|frame| views::render(frame, self))?;

            // Poll terminal events (non-blocking with short timeout)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            // Process backend events (non-blocking)
            while let Ok(event) = ui_rx.try_recv() {
                self.apply_event(event);
            }

            // Ship queued commands to the backend
            for cmd in self.take_commands() {
                let _ = cmd_tx.blocking_send(cmd);
            }

            if self.should_quit {
                break;
            }
        }

        let _ = cmd_tx.blocking_send(Command::Quit);
        Ok(())
    }

    /// Apply an event from the backend to the application state.
    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::TasksLoaded(page) => {
                self.store.fetch_fulfilled(page);
                self.clamp_selection();
            }
            UiEvent::TaskCreated(task) => {
                self.status_message = Some(format!("Created \"{}\"", task.title));
                self.store.create_fulfilled(task);
                self.form = None;
                self.view = View::List;
                self.refresh();
            }
            UiEvent::TaskUpdated(task) => {
                self.status_message = Some(format!("Updated \"{}\"", task.title));
                if self
                    .detail
                    .as_ref()
                    .is_some_and(|detail| detail.id == task.id)
                {
                    self.detail = Some(task.clone());
                }
                self.store.update_fulfilled(task);
                if self.form.is_some() {
                    self.form = None;
                    self.view = View::List;
                }
            }
            UiEvent::TaskDeleted(id) => {
                self.status_message = Some("Task deleted successfully".to_string());
                self.store.delete_fulfilled(&id);
                self.clamp_selection();
                self.refresh();
            }
            UiEvent::RequestFailed { operation, message } => {
                match (operation, self.form.as_mut()) {
                    // Form submits show their error inline and stay open
                    (Operation::Create | Operation::Update, Some(form)) => {
                        form.error = Some(message);
                        form.submitting = false;
                        self.store.settle();
                    }
                    _ => {
                        self.store.rejected(message);
                    }
                }
            }
        }
    }

    /// Handle a key press for the current view.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.view {
            View::List if self.filter_mode => self.handle_filter_key(key.code),
            View::List => self.handle_list_key(key.code),
            View::Detail => self.handle_detail_key(key.code),
            View::Form => self.handle_form_key(key.code),
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected += 1;
                self.clamp_selection();
            }
            KeyCode::Enter => {
                if let Some(task) = self.selected_task().cloned() {
                    self.detail = Some(task);
                    self.view = View::Detail;
                }
            }
            KeyCode::Char('a') => {
                self.form = Some(TaskForm::add());
                self.view = View::Form;
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task().cloned() {
                    self.form = Some(TaskForm::edit(&task));
                    self.view = View::Form;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
                    self.store.delete_pending();
                    self.outbox.push(Command::DeleteTask(id));
                }
            }
            KeyCode::Char('n') | KeyCode::Right => {
                if self.store.page < self.store.total_pages() {
                    self.store.next_page();
                    self.selected = 0;
                    self.refresh();
                }
            }
            KeyCode::Char('p') | KeyCode::Left => {
                if self.store.page > 1 {
                    self.store.prev_page();
                    self.selected = 0;
                    self.refresh();
                }
            }
            KeyCode::Char('/') => {
                self.filter_mode = true;
            }
            KeyCode::Char('s') => {
                self.store.cycle_status_filter();
                self.clamp_selection();
            }
            KeyCode::Char('r') => {
                self.refresh();
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter => {
                self.filter_mode = false;
            }
            KeyCode::Backspace => {
                self.store.filter_text.pop();
                self.clamp_selection();
            }
            KeyCode::Char(c) => {
                self.store.filter_text.push(c);
                self.clamp_selection();
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.detail = None;
                self.view = View::List;
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.detail.clone() {
                    self.form = Some(TaskForm::edit(&task));
                    self.view = View::Form;
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let Some(form) = self.form.as_mut() else {
            self.view = View::List;
            return;
        };

        match code {
            KeyCode::Esc => {
                self.form = None;
                self.view = if self.detail.is_some() {
                    View::Detail
                } else {
                    View::List
                };
            }
            KeyCode::Tab | KeyCode::Down => {
                form.focus = match form.focus {
                    FormField::Title => FormField::Description,
                    FormField::Description => FormField::Status,
                    FormField::Status => FormField::Title,
                };
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus = match form.focus {
                    FormField::Title => FormField::Status,
                    FormField::Description => FormField::Title,
                    FormField::Status => FormField::Description,
                };
            }
            KeyCode::Left | KeyCode::Right if form.focus == FormField::Status => {
                form.status = match form.status {
                    TaskStatus::Pending => TaskStatus::InProgress,
                    TaskStatus::InProgress => TaskStatus::Completed,
                    TaskStatus::Completed => TaskStatus::Pending,
                };
            }
            KeyCode::Backspace => match form.focus {
                FormField::Title => {
                    form.title.pop();
                }
                FormField::Description => {
                    form.description.pop();
                }
                FormField::Status => {}
            },
            KeyCode::Char(c) => match form.focus {
                FormField::Title => form.title.push(c),
                FormField::Description => form.description.push(c),
                FormField::Status => {}
            },
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    /// Validate the open form and queue the matching command.
    fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        if form.submitting {
            return;
        }

        if form.title.trim().is_empty() {
            form.error = Some("Title is required".to_string());
            return;
        }
        if form.description.trim().is_empty() {
            form.error = Some("Description is required".to_string());
            return;
        }

        form.error = None;
        form.submitting = true;

        // Surrounding whitespace is an input artifact, not content
        let title = form.title.trim().to_string();
        let description = form.description.trim().to_string();

        let command = match &form.mode {
            FormMode::Add => {
                self.store.create_pending();
                Command::CreateTask(CreateTask {
                    title,
                    description,
                    status: form.status,
                })
            }
            FormMode::Edit { id } => {
                self.store.update_pending();
                Command::UpdateTask {
                    id: id.clone(),
                    input: UpdateTask {
                        title: Some(title),
                        description: Some(description),
                        status: Some(form.status),
                    },
                }
            }
        };
        self.outbox.push(command);
    }

    /// The task under the cursor in the filtered list.
    pub fn selected_task(&self) -> Option<&Task> {
        self.store.filtered_tasks().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.store.filtered_tasks().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_tasks::TaskPage;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn task(id: &str, title: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            status,
        }
    }

    fn loaded_app(tasks: Vec<Task>, total: u64) -> App {
        let mut app = App::new();
        app.apply_event(UiEvent::TasksLoaded(TaskPage { tasks, total }));
        app.take_commands();
        app
    }

    #[test]
    fn test_refresh_queues_fetch_for_current_page() {
        let mut app = App::new();
        app.store.page = 2;
        app.refresh();
        assert_eq!(
            app.take_commands(),
            vec![Command::FetchTasks { page: 2, limit: 5 }]
        );
        assert!(app.store.loading);
    }

    #[test]
    fn test_delete_key_queues_delete_for_selection() {
        let mut app = loaded_app(vec![task("1", "a", TaskStatus::Pending)], 1);
        app.store.error = Some("stale".to_string());

        app.handle_key(key(KeyCode::Char('d')));

        assert_eq!(
            app.take_commands(),
            vec![Command::DeleteTask("1".to_string())]
        );
        assert!(app.store.loading);
        assert!(app.store.error.is_none());
    }

    #[test]
    fn test_task_deleted_refetches() {
        let mut app = loaded_app(vec![task("1", "a", TaskStatus::Pending)], 1);
        app.apply_event(UiEvent::TaskDeleted("1".to_string()));
        assert_eq!(
            app.take_commands(),
            vec![Command::FetchTasks { page: 1, limit: 5 }]
        );
        assert_eq!(
            app.status_message.as_deref(),
            Some("Task deleted successfully")
        );
    }

    #[test]
    fn test_enter_opens_detail() {
        let mut app = loaded_app(vec![task("1", "a", TaskStatus::Pending)], 1);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view, View::Detail);
        assert_eq!(app.detail.as_ref().unwrap().id, "1");
    }

    #[test]
    fn test_add_form_submit_queues_create() {
        let mut app = loaded_app(Vec::new(), 0);
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.view, View::Form);

        for c in "New task".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        for c in "details".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        let commands = app.take_commands();
        assert_eq!(
            commands,
            vec![Command::CreateTask(CreateTask {
                title: "New task".to_string(),
                description: "details".to_string(),
                status: TaskStatus::Pending,
            })]
        );
    }

    #[test]
    fn test_form_requires_title() {
        let mut app = loaded_app(Vec::new(), 0);
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Enter));

        assert!(app.take_commands().is_empty());
        assert_eq!(
            app.form.as_ref().unwrap().error.as_deref(),
            Some("Title is required")
        );
    }

    #[test]
    fn test_create_conflict_shows_inline_error() {
        let mut app = loaded_app(Vec::new(), 0);
        app.handle_key(key(KeyCode::Char('a')));
        for c in "dup".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Enter));
        app.take_commands();

        app.apply_event(UiEvent::RequestFailed {
            operation: Operation::Create,
            message: "Task with this title already exists".to_string(),
        });

        let form = app.form.as_ref().unwrap();
        assert_eq!(app.view, View::Form);
        assert_eq!(
            form.error.as_deref(),
            Some("Task with this title already exists")
        );
        assert!(!form.submitting);
        assert!(!app.store.loading);
    }

    #[test]
    fn test_task_created_appends_closes_form_and_refetches() {
        let mut app = loaded_app(Vec::new(), 0);
        app.handle_key(key(KeyCode::Char('a')));
        app.apply_event(UiEvent::TaskCreated(task("1", "New", TaskStatus::Pending)));

        assert_eq!(app.view, View::List);
        assert!(app.form.is_none());
        assert_eq!(app.store.tasks.len(), 1);
        assert_eq!(app.store.total, 1);
        assert_eq!(
            app.take_commands(),
            vec![Command::FetchTasks { page: 1, limit: 5 }]
        );
    }

    #[test]
    fn test_edit_form_prefills_and_submits_update() {
        let mut app = loaded_app(vec![task("1", "Old", TaskStatus::Pending)], 1);
        app.handle_key(key(KeyCode::Char('e')));

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.title, "Old");
        assert_eq!(form.mode, FormMode::Edit { id: "1".to_string() });

        app.handle_key(key(KeyCode::Enter));
        let commands = app.take_commands();
        assert_eq!(
            commands,
            vec![Command::UpdateTask {
                id: "1".to_string(),
                input: UpdateTask {
                    title: Some("Old".to_string()),
                    description: Some("desc".to_string()),
                    status: Some(TaskStatus::Pending),
                },
            }]
        );
    }

    #[test]
    fn test_submit_trims_surrounding_whitespace() {
        let mut app = loaded_app(vec![task("1", "Old", TaskStatus::Pending)], 1);
        app.handle_key(key(KeyCode::Char('e')));

        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(
            app.take_commands(),
            vec![Command::UpdateTask {
                id: "1".to_string(),
                input: UpdateTask {
                    title: Some("Old".to_string()),
                    description: Some("desc".to_string()),
                    status: Some(TaskStatus::Pending),
                },
            }]
        );
        assert!(app.store.loading);
    }

    #[test]
    fn test_pagination_keys() {
        let mut app = loaded_app(Vec::new(), 12);
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.store.page, 2);
        assert_eq!(
            app.take_commands(),
            vec![Command::FetchTasks { page: 2, limit: 5 }]
        );

        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.store.page, 1);
    }

    #[test]
    fn test_filter_mode_captures_text() {
        let mut app = loaded_app(
            vec![
                task("1", "Buy Milk", TaskStatus::Pending),
                task("2", "Walk dog", TaskStatus::Pending),
            ],
            2,
        );
        app.handle_key(key(KeyCode::Char('/')));
        for c in "milk".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert!(!app.filter_mode);
        assert_eq!(app.store.filter_text, "milk");
        assert_eq!(app.selected_task().unwrap().id, "1");
    }

    #[test]
    fn test_fetch_failure_records_store_error() {
        let mut app = loaded_app(Vec::new(), 0);
        app.apply_event(UiEvent::RequestFailed {
            operation: Operation::Fetch,
            message: "connection refused".to_string(),
        });
        assert_eq!(app.store.error.as_deref(), Some("connection refused"));
    }
}
