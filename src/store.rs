//! The view-model that owns the task list for the currently displayed date window.
//!
//! The store never merges: every successful load replaces the whole list. It never
//! retries either; a failed load leaves the store in a retryable
//! [`LoadState::Failed`] state and the previous list untouched, so presentation can
//! offer a manual retry.
//!
//! Loads carry a monotonic sequence number. When several loads are in flight (e.g.
//! rapid week navigation), only the most recently issued one is allowed to land;
//! stale responses are discarded instead of clobbering a newer window.

use chrono::NaiveDate;

use crate::api::{ApiError, TaskApi};
use crate::session::Session;
use crate::task::{NewTask, Task, TaskId};

/// Where the store stands with respect to the server
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    /// No load has been issued yet
    NotLoaded,
    /// A load has been issued and has not landed yet
    Loading,
    /// The list mirrors the last successful load
    Loaded,
    /// The last load failed. The held list is whatever the previous successful load
    /// brought; the user may retry.
    Failed(String),
}

/// Identifies one issued load, so its response can be matched against newer loads
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadTicket {
    seq: u64,
    reference_date: NaiveDate,
}

/// Holds the fetched task list for one date window
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    window: Option<NaiveDate>,
    state: LoadState,
    last_issued_seq: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            window: None,
            state: LoadState::NotLoaded,
            last_issued_seq: 0,
        }
    }

    /// The tasks of the current window, in the order the server returned them
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The reference date of the window the held list belongs to
    pub fn window(&self) -> Option<NaiveDate> {
        self.window
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Register that a load is being issued for the given window.
    ///
    /// Every call supersedes all previously issued loads: their responses will be
    /// discarded when they are applied.
    pub fn begin_load(&mut self, reference_date: NaiveDate) -> LoadTicket {
        self.last_issued_seq += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            seq: self.last_issued_seq,
            reference_date,
        }
    }

    /// Land the outcome of an issued load.
    ///
    /// Returns whether the store now holds the loaded list. Stale outcomes (a newer
    /// load has been issued since this ticket) are discarded, successful ones replace
    /// the list wholesale, failures switch the store to [`LoadState::Failed`] without
    /// touching the list.
    pub fn apply_load(&mut self, ticket: LoadTicket, outcome: Result<Vec<Task>, ApiError>) -> bool {
        if ticket.seq < self.last_issued_seq {
            log::debug!(
                "Discarding stale load response for {} (seq {} < {})",
                ticket.reference_date,
                ticket.seq,
                self.last_issued_seq
            );
            return false;
        }

        match outcome {
            Ok(tasks) => {
                log::debug!(
                    "Window {} loaded with {} tasks",
                    ticket.reference_date,
                    tasks.len()
                );
                self.tasks = tasks;
                self.window = Some(ticket.reference_date);
                self.state = LoadState::Loaded;
                true
            }
            Err(err) => {
                log::warn!("Unable to load tasks for {}: {}", ticket.reference_date, err);
                self.state = LoadState::Failed(err.to_string());
                false
            }
        }
    }

    /// Fetch the window identified by `reference_date` and replace the held list.
    ///
    /// With no session (nobody is signed in), this resolves to an empty list without
    /// issuing a request. Returns whether the store now holds the requested window.
    pub async fn load_for_window<A: TaskApi>(
        &mut self,
        api: &A,
        session: Option<&Session>,
        reference_date: NaiveDate,
    ) -> bool {
        let ticket = self.begin_load(reference_date);
        let outcome = match session {
            None => Ok(Vec::new()),
            Some(session) => api.tasks_for_date(session, reference_date).await,
        };
        self.apply_load(ticket, outcome)
    }

    /// Create a task, then reload the current window so the list reflects what the
    /// server actually stored.
    ///
    /// On failure the error is logged and the list is left untouched. Returns whether
    /// the task was created.
    pub async fn create_task<A: TaskApi>(
        &mut self,
        api: &A,
        session: &Session,
        new_task: NewTask,
    ) -> bool {
        match api.create_task(session, new_task).await {
            Err(err) => {
                log::error!("Unable to create task: {}", err);
                false
            }
            Ok(task) => {
                log::info!("Created task {} ({})", task.id(), task.title());
                match self.window {
                    Some(window) => self.load_for_window(api, Some(session), window).await,
                    None => true,
                }
            }
        }
    }

    /// Flip the completion record of `(task, date)`, then reload the current window.
    ///
    /// Which request is sent ("complete" or "uncomplete") depends on the completion
    /// state currently held for the task. The list is not flipped locally: the state
    /// only changes once the reload lands. On failure the error is logged and the list
    /// keeps its prior state. Returns whether the toggle went through.
    pub async fn toggle_completion<A: TaskApi>(
        &mut self,
        api: &A,
        session: &Session,
        task_id: &TaskId,
        date: NaiveDate,
    ) -> bool {
        let completed = match self.tasks.iter().find(|task| task.id() == task_id) {
            None => {
                log::warn!("Cannot toggle completion of unknown task {}", task_id);
                return false;
            }
            Some(task) => task.completed(),
        };

        let outcome = if completed {
            api.uncomplete_task(session, task_id, date).await
        } else {
            api.complete_task(session, task_id, date).await
        };
        if let Err(err) = outcome {
            log::error!("Unable to toggle completion of task {}: {}", task_id, err);
            return false;
        }

        let window = self.window.unwrap_or(date);
        self.load_for_window(api, Some(session), window).await
    }
}
