//! This crate provides a way to schedule and track recurring skincare tasks.
//!
//! The tasks themselves live behind a remote REST service; this crate talks to it through
//! the [`TaskApi`](api::TaskApi) trait, implemented for real servers by a
//! [`RestClient`](client::RestClient). \
//! On top of that seam, a [`TaskStore`] owns the task list for the currently displayed
//! date window, the [`form`] module validates task drafts before anything is sent, and
//! the [`view`] module lays a window out as a week grid or a flat list.
//!
//! Tasks recur either daily or on a fixed subset of weekdays (see
//! [`Weekdays`](schedule::Weekdays)), and completion is a per-date record, not a
//! property of the task: completing "Apply face mask" on Tuesday says nothing about
//! Thursday.

pub mod api;
pub mod client;
pub mod config;
pub mod form;
pub mod mock_api;
pub mod schedule;
pub use schedule::Schedule;
pub use schedule::Weekdays;
mod task;
pub use task::{NewTask, Task, TaskId, TaskKind};
mod routine;
pub use routine::{Routine, RoutineId};
mod session;
pub use session::{Session, UserId};
pub mod store;
pub use store::TaskStore;
pub mod view;
