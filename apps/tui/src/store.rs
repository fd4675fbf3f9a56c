//! Client-side task state.
//!
//! The store holds the last fetched page plus the UI-side filter, and is
//! mutated only through explicit transitions so every state change has a
//! single place to look.

use domain_tasks::{Task, TaskPage, TaskStatus};

/// Client-side snapshot of the task collection.
#[derive(Debug, Clone)]
pub struct TaskStore {
    /// Tasks on the current page, in server order.
    pub tasks: Vec<Task>,
    /// Total number of tasks on the server.
    pub total: u64,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Last request error, cleared on the next request.
    pub error: Option<String>,
    /// Current 1-based page.
    pub page: u64,
    /// Page size.
    pub limit: i64,
    /// Case-insensitive title filter.
    pub filter_text: String,
    /// Exact status filter.
    pub filter_status: Option<TaskStatus>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            page: 1,
            limit: 5,
            filter_text: String::new(),
            filter_status: None,
        }
    }
}

impl TaskStore {
    /// A fetch has started.
    pub fn fetch_pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A fetch completed with one page of tasks.
    pub fn fetch_fulfilled(&mut self, page: TaskPage) {
        self.loading = false;
        self.tasks = page.tasks;
        self.total = page.total;
    }

    /// A create has started.
    pub fn create_pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A task was created on the server.
    ///
    /// Appends it locally; the caller still refetches so the server
    /// stays authoritative over page boundaries.
    pub fn create_fulfilled(&mut self, task: Task) {
        self.loading = false;
        self.tasks.push(task);
        self.total += 1;
    }

    /// An update has started.
    pub fn update_pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A delete has started.
    pub fn delete_pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A request failed.
    pub fn rejected(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// A request finished but its outcome is surfaced elsewhere
    /// (for example as an inline form error).
    pub fn settle(&mut self) {
        self.loading = false;
    }

    /// A task was updated on the server; reflect it in place.
    pub fn update_fulfilled(&mut self, task: Task) {
        self.loading = false;
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        }
    }

    /// A task was deleted on the server.
    ///
    /// Removes it locally and steps back a page when the current page
    /// just became empty, so the caller can refetch a valid page.
    pub fn delete_fulfilled(&mut self, id: &str) {
        self.loading = false;
        self.tasks.retain(|t| t.id != id);
        self.total = self.total.saturating_sub(1);
        if self.tasks.is_empty() && self.page > 1 {
            self.page -= 1;
        }
    }

    /// Jump to a page, clamped to the valid range.
    pub fn set_page(&mut self, page: u64) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Number of pages the server collection spans (at least 1).
    pub fn total_pages(&self) -> u64 {
        let limit = self.limit.max(1) as u64;
        self.total.div_ceil(limit).max(1)
    }

    /// Cycle the status filter: none -> pending -> in-progress -> completed -> none.
    pub fn cycle_status_filter(&mut self) {
        self.filter_status = match self.filter_status {
            None => Some(TaskStatus::Pending),
            Some(TaskStatus::Pending) => Some(TaskStatus::InProgress),
            Some(TaskStatus::InProgress) => Some(TaskStatus::Completed),
            Some(TaskStatus::Completed) => None,
        };
    }

    /// Whether any filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.filter_text.is_empty() || self.filter_status.is_some()
    }

    /// Tasks on the current page that pass the filter.
    ///
    /// The text filter is a case-insensitive substring match on the title,
    /// the status filter an exact match.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        let needle = self.filter_text.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| needle.is_empty() || t.title.to_lowercase().contains(&needle))
            .filter(|t| {
                self.filter_status
                    .is_none_or(|status| t.status == status)
            })
            .collect()
    }
}
