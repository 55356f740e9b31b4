//! The seam between this crate and the remote task-scheduling service.
//!
//! [`TaskApi`] is implemented by the real [`RestClient`](crate::client::RestClient), and
//! by [`MockApi`](crate::mock_api::MockApi) so that tests can run without a server.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::routine::Routine;
use crate::session::Session;
use crate::task::{NewTask, Task, TaskId};

/// What the remote service can answer with when something goes wrong.
///
/// The small set of categories below is everything presentation code is expected to tell
/// apart; any other HTTP failure passes through as [`ApiError::Unexpected`] with the raw
/// response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized: please log in")]
    Unauthorized,

    #[error("forbidden: you do not have permission to access this resource")]
    Forbidden,

    #[error("resource not found: {0}")]
    NotFound(String),

    /// The request never reached the service (DNS failure, refused connection, dropped
    /// body...)
    #[error("connectivity error: {0}")]
    Connectivity(#[source] reqwest::Error),

    /// The service answered 2xx but the body was not what we expected
    #[error("malformed response body: {0}")]
    BadResponse(#[from] serde_json::Error),

    #[error("request failed with status {status}: {body}")]
    Unexpected { status: u16, body: String },

    /// Failure injected by a mocked service
    #[cfg(any(test, feature = "mock_remote_api"))]
    #[error("mocked failure: {0}")]
    Mocked(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything this crate needs from the remote task-scheduling service.
///
/// Every method takes an explicit [`Session`]: there is no ambient "current user".
/// None of these calls is retried on failure; a failed call is terminal for the user
/// action that triggered it.
#[async_trait]
pub trait TaskApi {
    /// Fetch the tasks applicable to the window identified by `date`, with each task's
    /// completion state resolved for that date.
    /// (`GET /tasks/{userId}/{date}`)
    async fn tasks_for_date(&self, session: &Session, date: NaiveDate) -> ApiResult<Vec<Task>>;

    /// Fetch the user's routines, for the routine-link picker.
    /// (`GET /routines/{userId}`)
    async fn routines(&self, session: &Session) -> ApiResult<Vec<Routine>>;

    /// Create a task. The server assigns its id.
    /// (`POST /tasks`)
    async fn create_task(&self, session: &Session, new_task: NewTask) -> ApiResult<Task>;

    /// Record a completion for `(task, date)`.
    /// (`POST /tasks/{id}/complete`)
    async fn complete_task(&self, session: &Session, task: &TaskId, date: NaiveDate)
        -> ApiResult<()>;

    /// Remove the completion record for `(task, date)`.
    /// (`POST /tasks/{id}/uncomplete`)
    async fn uncomplete_task(
        &self,
        session: &Session,
        task: &TaskId,
        date: NaiveDate,
    ) -> ApiResult<()>;
}
