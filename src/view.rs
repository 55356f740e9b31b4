//! Presentation helpers for the scheduler page.
//!
//! Nothing here talks to the server. [`SchedulerView`] only holds the transient UI
//! state (view mode, displayed week, modal visibility); the task list itself lives in
//! the [`TaskStore`](crate::store::TaskStore), and deciding which task shows up in
//! which day cell is a pure function of that list.

use chrono::{Datelike, Duration, NaiveDate};

use crate::task::Task;

/// The two renderings of the same task window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    /// A seven-column week grid
    Calendar,
    /// A flat list
    List,
}

/// Short weekday labels, indexed by the service's weekday convention (Sunday = 0)
pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The label for a weekday index.
///
/// # Panics
/// Panics if `day` is out of the [0, 6] range
pub fn day_label(day: u8) -> &'static str {
    DAY_LABELS[usize::from(day)]
}

/// Snap a date back to the Sunday that starts its week
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The tasks that occur on the given weekday index, in list order
pub fn tasks_for_day<'win>(tasks: &'win [Task], day: u8) -> Vec<&'win Task> {
    tasks.iter().filter(|task| task.occurs_on(day)).collect()
}

/// One cell of the week grid
#[derive(Clone, Debug)]
pub struct DayCell<'win> {
    pub date: NaiveDate,
    /// Weekday index of `date` (Sunday = 0)
    pub weekday: u8,
    pub tasks: Vec<&'win Task>,
}

/// Lay a task window out as the seven day cells of the week starting at
/// `reference_date`'s Sunday
pub fn week_grid<'win>(tasks: &'win [Task], reference_date: NaiveDate) -> Vec<DayCell<'win>> {
    let start = week_start(reference_date);
    (0..7)
        .map(|offset| {
            let date = start + Duration::days(i64::from(offset));
            let weekday = date.weekday().num_days_from_sunday() as u8;
            DayCell {
                date,
                weekday,
                tasks: tasks_for_day(tasks, weekday),
            }
        })
        .collect()
}

/// Transient UI state of the scheduler page.
///
/// Week navigation only moves the reference date; the caller is responsible for asking
/// the store to reload whenever [`SchedulerView::reference_date`] changes.
#[derive(Clone, Debug)]
pub struct SchedulerView {
    mode: ViewMode,
    today: NaiveDate,
    current_week_start: NaiveDate,
    /// When set, the window targets today instead of the displayed week's start
    /// (the dashboard's "show today's tasks" entry point)
    show_today: bool,
    modal_open: bool,
}

impl SchedulerView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: ViewMode::List,
            today,
            current_week_start: week_start(today),
            show_today: false,
            modal_open: false,
        }
    }

    /// A view opened from the dashboard, targeting today's tasks
    pub fn for_today(today: NaiveDate) -> Self {
        let mut view = Self::new(today);
        view.show_today = true;
        view
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn week_start(&self) -> NaiveDate {
        self.current_week_start
    }

    /// The date the task window should be fetched for
    pub fn reference_date(&self) -> NaiveDate {
        if self.show_today {
            self.today
        } else {
            self.current_week_start
        }
    }

    /// Move the displayed week 7 days back. Returns the new reference date, for the
    /// caller to reload the store with.
    pub fn previous_week(&mut self) -> NaiveDate {
        self.current_week_start = self.current_week_start - Duration::days(7);
        self.reference_date()
    }

    /// Move the displayed week 7 days forward. Returns the new reference date, for the
    /// caller to reload the store with.
    pub fn next_week(&mut self) -> NaiveDate {
        self.current_week_start = self.current_week_start + Duration::days(7);
        self.reference_date()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }
    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }
    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }
}
