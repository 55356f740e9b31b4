//! Draft state and cross-field validation for the "schedule a task" form.
//!
//! Validation happens before anything is sent: a draft that does not pass
//! [`TaskDraft::validate`] cannot be submitted at all (the UI is expected to disable its
//! submit control based on [`TaskDraft::can_submit`], rather than reject on click).

use chrono::NaiveTime;
use thiserror::Error;

use crate::routine::Routine;
use crate::schedule::{Schedule, Weekdays};
use crate::session::UserId;
use crate::task::{NewTask, TaskKind};

/// Why a draft cannot be submitted yet
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a title is required")]
    MissingTitle,
    #[error("a routine must be selected for routine-linked tasks")]
    MissingRoutine,
    #[error("at least one weekday must be selected for weekly tasks")]
    NoWeekdaySelected,
}

/// Which of the two task-kind radio buttons is selected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindChoice {
    Basic,
    RoutineLinked,
}

/// The in-progress state of the scheduling form.
///
/// A fresh draft matches the form's defaults: a basic daily task with all seven
/// weekdays preselected and no advisory time.
#[derive(Clone, Debug)]
pub struct TaskDraft {
    title: String,
    kind: KindChoice,
    routine: Option<Routine>,
    schedule: Schedule,
    days_of_week: Weekdays,
    time: Option<NaiveTime>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskDraft {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            kind: KindChoice::Basic,
            routine: None,
            schedule: Schedule::Daily,
            days_of_week: Weekdays::every_day(),
            time: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn kind(&self) -> KindChoice {
        self.kind
    }
    pub fn routine(&self) -> Option<&Routine> {
        self.routine.as_ref()
    }
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }
    pub fn days_of_week(&self) -> Weekdays {
        self.days_of_week
    }
    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn set_title<S: ToString>(&mut self, title: S) {
        self.title = title.to_string();
    }

    pub fn choose_kind(&mut self, kind: KindChoice) {
        self.kind = kind;
    }

    /// Link the draft to a routine.
    ///
    /// The title is overwritten with the routine's name every time, even if the user
    /// had typed something: routine-linked tasks are named after their routine.
    pub fn select_routine(&mut self, routine: Routine) {
        self.title = routine.name().to_string();
        self.routine = Some(routine);
    }

    pub fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }

    /// Flip one weekday in the weekly day picker
    pub fn toggle_day(&mut self, day: u8) {
        self.days_of_week.toggle_index(day);
    }

    pub fn set_time(&mut self, time: Option<NaiveTime>) {
        self.time = time;
    }

    /// The cross-field validation policy:
    /// * basic tasks need a title,
    /// * routine-linked tasks need a selected routine,
    /// * weekly tasks need at least one weekday.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.kind {
            KindChoice::Basic => {
                if self.title.trim().is_empty() {
                    return Err(ValidationError::MissingTitle);
                }
            }
            KindChoice::RoutineLinked => {
                if self.routine.is_none() {
                    return Err(ValidationError::MissingRoutine);
                }
            }
        }
        if self.schedule == Schedule::Weekly && self.days_of_week.is_empty() {
            return Err(ValidationError::NoWeekdaySelected);
        }
        Ok(())
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// Turn the draft into a creation payload for `owner`.
    ///
    /// Daily tasks always get all seven weekdays, whatever the day picker held when the
    /// user switched the schedule back to daily: the recurrence evaluator trusts the
    /// stored set, so creation is where the "daily means every day" invariant is
    /// enforced.
    pub fn submit(&self, owner: &UserId) -> Result<NewTask, ValidationError> {
        self.validate()?;

        let kind = match self.kind {
            KindChoice::Basic => TaskKind::Basic,
            KindChoice::RoutineLinked => TaskKind::RoutineLinked(
                self.routine.as_ref()
                    .unwrap(/* validate() just checked a routine is selected */)
                    .id()
                    .clone(),
            ),
        };
        let days_of_week = match self.schedule {
            Schedule::Daily => Weekdays::every_day(),
            Schedule::Weekly => self.days_of_week,
        };

        Ok(NewTask::new(
            self.title.clone(),
            kind,
            owner.clone(),
            self.schedule,
            days_of_week,
            self.time,
        ))
    }
}
