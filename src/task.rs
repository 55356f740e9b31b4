//! Recurring skincare tasks

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::routine::RoutineId;
use crate::schedule::{Schedule, Weekdays};
use crate::session::UserId;

/// Opaque task identifier, assigned by the remote store
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Whether a task stands on its own or tracks a whole skincare routine.
///
/// The service models this as two fields (`type` and `routineId`), which allows the
/// nonsensical combination "routine-linked, but no routine". This enum forbids it: a
/// routine-linked task always carries its routine reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Basic,
    RoutineLinked(RoutineId),
}

impl TaskKind {
    pub fn is_routine_linked(&self) -> bool {
        match self {
            TaskKind::RoutineLinked(_) => true,
            _ => false,
        }
    }

    pub fn routine(&self) -> Option<&RoutineId> {
        match self {
            TaskKind::RoutineLinked(id) => Some(id),
            TaskKind::Basic => None,
        }
    }
}

/// A recurring task, as fetched for a given date.
///
/// `completed` is not a permanent property of the task: it is the per-day completion
/// record the server resolved for the date the containing window was requested for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskWire", into = "TaskWire")]
pub struct Task {
    id: TaskId,
    title: String,
    kind: TaskKind,
    owner: UserId,
    schedule: Schedule,
    days_of_week: Weekdays,
    /// Advisory clock time. Never enforced, never alarmed.
    time: Option<NaiveTime>,
    completed: bool,
}

impl Task {
    /// Build a task that already exists on the server
    pub fn new(
        id: TaskId,
        title: String,
        kind: TaskKind,
        owner: UserId,
        schedule: Schedule,
        days_of_week: Weekdays,
        time: Option<NaiveTime>,
        completed: bool,
    ) -> Self {
        Self {
            id,
            title,
            kind,
            owner,
            schedule,
            days_of_week,
            time,
            completed,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }
    pub fn owner(&self) -> &UserId {
        &self.owner
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
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// The recurrence evaluator: does this task occur on the given weekday index
    /// (Sunday = 0)?
    ///
    /// This is a plain membership test against the stored weekday set. Daily tasks are
    /// expected to store all seven days, and the stored set is trusted as-is: an empty
    /// set makes the task occur on no day at all.
    pub fn occurs_on(&self, weekday: u8) -> bool {
        self.days_of_week.contains_index(weekday)
    }

    /// Same as [`Task::occurs_on`], for a calendar date
    pub fn occurs_on_date(&self, date: chrono::NaiveDate) -> bool {
        use chrono::Datelike;
        self.days_of_week.contains(Weekdays::from(date.weekday()))
    }

    /// Build the server-side representation of a newly created task.
    ///
    /// Only mocked servers need this: real ones assign the id themselves.
    #[cfg(any(test, feature = "mock_remote_api"))]
    pub fn from_new(new_task: &NewTask, id: TaskId) -> Self {
        Self {
            id,
            title: new_task.title.clone(),
            kind: new_task.kind(),
            owner: new_task.owner.clone(),
            schedule: new_task.schedule,
            days_of_week: new_task.days_of_week,
            time: new_task.time,
            completed: false,
        }
    }

    #[cfg(any(test, feature = "mock_remote_api"))]
    pub fn with_completed(&self, completed: bool) -> Self {
        let mut copy = self.clone();
        copy.completed = completed;
        copy
    }
}

/// The payload sent to the server when creating a task.
///
/// No id here (the server assigns one), and no completion state (a task starts its life
/// pending on every date).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    title: String,
    #[serde(flatten)]
    kind: KindWire,
    #[serde(rename = "userId")]
    owner: UserId,
    schedule: Schedule,
    #[serde(with = "clock_time")]
    time: Option<NaiveTime>,
    days_of_week: Weekdays,
}

impl NewTask {
    pub fn new(
        title: String,
        kind: TaskKind,
        owner: UserId,
        schedule: Schedule,
        days_of_week: Weekdays,
        time: Option<NaiveTime>,
    ) -> Self {
        Self {
            title,
            kind: KindWire::from(kind),
            owner,
            schedule,
            time,
            days_of_week,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn kind(&self) -> TaskKind {
        self.kind.clone().into_kind()
            .unwrap(/* KindWire is only ever built from a TaskKind here, so it is consistent */)
    }
    pub fn owner(&self) -> &UserId {
        &self.owner
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
}

/// The `type`/`routineId` field pair, as the service exchanges it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct KindWire {
    #[serde(rename = "type")]
    tag: KindTag,
    #[serde(rename = "routineId", default)]
    routine_id: Option<RoutineId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
enum KindTag {
    #[serde(rename = "task")]
    Task,
    #[serde(rename = "routine")]
    Routine,
}

impl From<TaskKind> for KindWire {
    fn from(kind: TaskKind) -> Self {
        match kind {
            TaskKind::Basic => KindWire {
                tag: KindTag::Task,
                routine_id: None,
            },
            TaskKind::RoutineLinked(id) => KindWire {
                tag: KindTag::Routine,
                routine_id: Some(id),
            },
        }
    }
}

impl KindWire {
    fn into_kind(self) -> Result<TaskKind, String> {
        match (self.tag, self.routine_id) {
            (KindTag::Task, _) => Ok(TaskKind::Basic),
            (KindTag::Routine, Some(id)) => Ok(TaskKind::RoutineLinked(id)),
            (KindTag::Routine, None) => {
                Err("routine-linked task does not reference a routine".to_string())
            }
        }
    }
}

/// A [`Task`] under the field names the service uses on the wire
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskWire {
    #[serde(rename = "_id")]
    id: TaskId,
    title: String,
    #[serde(flatten)]
    kind: KindWire,
    #[serde(rename = "userId")]
    owner: UserId,
    schedule: Schedule,
    #[serde(default, with = "clock_time")]
    time: Option<NaiveTime>,
    days_of_week: Weekdays,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<TaskWire> for Task {
    type Error = String;

    fn try_from(wire: TaskWire) -> Result<Self, Self::Error> {
        let kind = wire
            .kind
            .clone()
            .into_kind()
            .map_err(|err| format!("task {}: {}", wire.id, err))?;
        Ok(Task {
            id: wire.id,
            title: wire.title,
            kind,
            owner: wire.owner,
            schedule: wire.schedule,
            days_of_week: wire.days_of_week,
            time: wire.time,
            completed: wire.completed,
        })
    }
}

impl From<Task> for TaskWire {
    fn from(task: Task) -> Self {
        TaskWire {
            id: task.id,
            title: task.title,
            kind: KindWire::from(task.kind),
            owner: task.owner,
            schedule: task.schedule,
            time: task.time,
            days_of_week: task.days_of_week,
            completed: task.completed,
        }
    }
}

/// Serde support for the advisory `HH:MM` time field.
///
/// The service sends an empty string when no time was picked, so both `""` and an
/// absent/null field decode to `None`.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub(super) fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(text) => NaiveTime::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_a_basic_task() {
        let json = r#"{
            "_id": "64ff01",
            "title": "Clean makeup brushes",
            "type": "task",
            "routineId": null,
            "userId": "user-1",
            "schedule": "weekly",
            "time": "",
            "daysOfWeek": [1, 3, 5],
            "completed": false
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id(), &TaskId::from("64ff01"));
        assert_eq!(task.title(), "Clean makeup brushes");
        assert_eq!(task.kind(), &TaskKind::Basic);
        assert_eq!(task.schedule(), Schedule::Weekly);
        assert_eq!(task.time(), None);
        assert_eq!(task.days_of_week().indices(), vec![1, 3, 5]);
        assert_eq!(task.completed(), false);
    }

    #[test]
    fn deserialize_a_routine_linked_task() {
        let json = r#"{
            "_id": "64ff02",
            "title": "Evening routine",
            "type": "routine",
            "routineId": "routine-9",
            "userId": "user-1",
            "schedule": "daily",
            "time": "21:30",
            "daysOfWeek": [0, 1, 2, 3, 4, 5, 6],
            "completed": true
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(
            task.kind(),
            &TaskKind::RoutineLinked(RoutineId::from("routine-9"))
        );
        assert_eq!(task.time(), Some(NaiveTime::from_hms(21, 30, 0)));
        assert!(task.completed());
    }

    #[test]
    fn routine_linked_task_without_a_routine_is_rejected() {
        let json = r#"{
            "_id": "64ff03",
            "title": "Broken",
            "type": "routine",
            "userId": "user-1",
            "schedule": "daily",
            "daysOfWeek": [0, 1, 2, 3, 4, 5, 6]
        }"#;

        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn recurrence_is_a_membership_test() {
        let mut days = Weekdays::empty();
        days.insert(Weekdays::TUESDAY);
        days.insert(Weekdays::THURSDAY);
        let task = Task::new(
            TaskId::from("t"),
            "Apply face mask".to_string(),
            TaskKind::Basic,
            UserId::from("user-1"),
            Schedule::Weekly,
            days,
            None,
            false,
        );

        for day in 0..=6 {
            assert_eq!(task.occurs_on(day), day == 2 || day == 4);
        }

        // 2026-08-25 is a Tuesday, 2026-08-26 a Wednesday
        assert!(task.occurs_on_date(chrono::NaiveDate::from_ymd(2026, 8, 25)));
        assert_eq!(
            task.occurs_on_date(chrono::NaiveDate::from_ymd(2026, 8, 26)),
            false
        );
    }

    #[test]
    fn new_task_serializes_to_the_service_format() {
        let new_task = NewTask::new(
            "Evening routine".to_string(),
            TaskKind::RoutineLinked(RoutineId::from("routine-9")),
            UserId::from("user-1"),
            Schedule::Daily,
            Weekdays::every_day(),
            Some(NaiveTime::from_hms(21, 30, 0)),
        );

        let value = serde_json::to_value(&new_task).unwrap();
        assert_eq!(value["title"], "Evening routine");
        assert_eq!(value["type"], "routine");
        assert_eq!(value["routineId"], "routine-9");
        assert_eq!(value["userId"], "user-1");
        assert_eq!(value["schedule"], "daily");
        assert_eq!(value["time"], "21:30");
        assert_eq!(
            value["daysOfWeek"],
            serde_json::json!([0, 1, 2, 3, 4, 5, 6])
        );
    }
}
