//! An in-memory task-scheduling service, so tests can run without a real server.
//!
//! [`MockApi`] also provides ways to tweak its behaviour, so that some tests can have
//! API calls return errors.
#![cfg(any(test, feature = "mock_remote_api"))]

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::api::{ApiError, ApiResult, TaskApi};
use crate::routine::Routine;
use crate::session::Session;
use crate::task::{NewTask, Task, TaskId};

/// This stores some behaviour tweaks, that describe how a mocked service will behave
/// during a given test
///
/// So that a method fails _n_ times after _m_ initial successes, set `(m, n)` for the
/// suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every call will be allowed
    pub is_suspended: bool,

    pub tasks_for_date_behaviour: (u32, u32),
    pub routines_behaviour: (u32, u32),
    pub create_task_behaviour: (u32, u32),
    pub complete_task_behaviour: (u32, u32),
    pub uncomplete_task_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All methods will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            tasks_for_date_behaviour: (0, n_fails),
            routines_behaviour: (0, n_fails),
            create_task_behaviour: (0, n_fails),
            complete_task_behaviour: (0, n_fails),
            uncomplete_task_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_fetch_tasks(&mut self) -> ApiResult<()> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.tasks_for_date_behaviour, "tasks_for_date")
    }
    pub fn can_fetch_routines(&mut self) -> ApiResult<()> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.routines_behaviour, "routines")
    }
    pub fn can_create_task(&mut self) -> ApiResult<()> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.create_task_behaviour, "create_task")
    }
    pub fn can_complete_task(&mut self) -> ApiResult<()> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.complete_task_behaviour, "complete_task")
    }
    pub fn can_uncomplete_task(&mut self) -> ApiResult<()> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.uncomplete_task_behaviour, "uncomplete_task")
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and
/// decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> ApiResult<()> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 -= 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(ApiError::Mocked(format!(
            "mocked behaviour requires this {} to fail this time ({:?})",
            descr, value
        )))
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}

#[derive(Default)]
struct MockState {
    tasks: Vec<Task>,
    routines: Vec<Routine>,
    /// The task-day join: one record per `(task, date)` that has been completed
    completions: HashSet<(TaskId, NaiveDate)>,
    requests_served: u32,
}

/// A [`TaskApi`] that stores everything in memory.
///
/// Completion state is kept as explicit `(task, date)` records, which is what the real
/// service is responsible for: completing a task for one date leaves every other date
/// pending.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
    behaviour: Mutex<MockBehaviour>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviour(behaviour: MockBehaviour) -> Self {
        Self {
            state: Mutex::new(MockState::default()),
            behaviour: Mutex::new(behaviour),
        }
    }

    /// Tweak the behaviour of the next calls
    pub fn behaviour_mut(&self) -> MutexGuard<'_, MockBehaviour> {
        self.behaviour.lock().unwrap()
    }

    /// Put a task on the mocked server without going through `create_task`
    pub fn seed_task(&self, task: Task) {
        self.state.lock().unwrap().tasks.push(task);
    }

    /// Put a routine on the mocked server
    pub fn add_routine(&self, routine: Routine) {
        self.state.lock().unwrap().routines.push(routine);
    }

    /// How many API requests this mocked server has answered (including failed ones)
    pub fn requests_served(&self) -> u32 {
        self.state.lock().unwrap().requests_served
    }

    /// Whether a completion record exists for `(task, date)`
    pub fn is_completed_on(&self, task: &TaskId, date: NaiveDate) -> bool {
        self.state
            .lock()
            .unwrap()
            .completions
            .contains(&(task.clone(), date))
    }

    fn serve(&self) {
        self.state.lock().unwrap().requests_served += 1;
    }
}

#[async_trait]
impl TaskApi for MockApi {
    async fn tasks_for_date(&self, session: &Session, date: NaiveDate) -> ApiResult<Vec<Task>> {
        self.serve();
        self.behaviour.lock().unwrap().can_fetch_tasks()?;

        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.owner() == session.user())
            .map(|task| {
                let completed = state.completions.contains(&(task.id().clone(), date));
                task.with_completed(completed)
            })
            .collect())
    }

    async fn routines(&self, _session: &Session) -> ApiResult<Vec<Routine>> {
        self.serve();
        self.behaviour.lock().unwrap().can_fetch_routines()?;

        Ok(self.state.lock().unwrap().routines.clone())
    }

    async fn create_task(&self, session: &Session, new_task: NewTask) -> ApiResult<Task> {
        self.serve();
        self.behaviour.lock().unwrap().can_create_task()?;

        if new_task.owner() != session.user() {
            return Err(ApiError::Forbidden);
        }

        let id = TaskId::from(Uuid::new_v4().to_hyphenated().to_string());
        let task = Task::from_new(&new_task, id);
        self.state.lock().unwrap().tasks.push(task.clone());
        Ok(task)
    }

    async fn complete_task(
        &self,
        session: &Session,
        task: &TaskId,
        date: NaiveDate,
    ) -> ApiResult<()> {
        self.serve();
        self.behaviour.lock().unwrap().can_complete_task()?;

        let mut state = self.state.lock().unwrap();
        let known = state
            .tasks
            .iter()
            .any(|candidate| candidate.id() == task && candidate.owner() == session.user());
        if !known {
            return Err(ApiError::NotFound(format!("/tasks/{}/complete", task)));
        }

        state.completions.insert((task.clone(), date));
        Ok(())
    }

    async fn uncomplete_task(
        &self,
        session: &Session,
        task: &TaskId,
        date: NaiveDate,
    ) -> ApiResult<()> {
        self.serve();
        self.behaviour.lock().unwrap().can_uncomplete_task()?;

        let mut state = self.state.lock().unwrap();
        let known = state
            .tasks
            .iter()
            .any(|candidate| candidate.id() == task && candidate.owner() == session.user());
        if !known {
            return Err(ApiError::NotFound(format!("/tasks/{}/uncomplete", task)));
        }

        state.completions.remove(&(task.clone(), date));
        Ok(())
    }
}
