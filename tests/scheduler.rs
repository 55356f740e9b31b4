//! End-to-end scenarios for the scheduler: form → store → view, against a mocked
//! remote service.
#![cfg(feature = "integration_tests")]

use chrono::{Duration, NaiveDate};

use vanity_shelf::api::TaskApi;
use vanity_shelf::form::{KindChoice, TaskDraft};
use vanity_shelf::mock_api::{MockApi, MockBehaviour};
use vanity_shelf::store::LoadState;
use vanity_shelf::view::{self, SchedulerView};
use vanity_shelf::{Routine, RoutineId, Schedule, Session, TaskKind, TaskStore, Weekdays};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A Wednesday, so that week snapping is actually exercised
fn today() -> NaiveDate {
    NaiveDate::from_ymd(2026, 8, 26)
}

#[tokio::test]
async fn scheduling_a_weekly_task_places_it_on_the_right_days() {
    init_logging();

    let session = Session::with_token("user-1", "firebase-token");
    let mock = MockApi::new();
    let mut store = TaskStore::new();
    let mut page = SchedulerView::new(today());

    assert!(
        store
            .load_for_window(&mock, Some(&session), page.reference_date())
            .await
    );
    assert!(store.tasks().is_empty());

    // Fill the form: "Apply face mask", weekly, Tuesday and Thursday only
    page.open_modal();
    let mut draft = TaskDraft::new();
    draft.set_title("Apply face mask");
    draft.set_schedule(Schedule::Weekly);
    for day in &[0u8, 1, 3, 5, 6] {
        draft.toggle_day(*day);
    }
    assert!(draft.can_submit());

    let new_task = draft.submit(session.user()).unwrap();
    assert!(store.create_task(&mock, &session, new_task).await);
    page.close_modal();

    // The reloaded window went through the server, which assigned an id
    assert_eq!(store.tasks().len(), 1);
    let task = &store.tasks()[0];
    assert_eq!(task.title(), "Apply face mask");
    assert_eq!(task.days_of_week().indices(), vec![2, 4]);

    // The calendar view shows the task in the Tuesday and Thursday cells only
    let grid = view::week_grid(store.tasks(), page.reference_date());
    for cell in &grid {
        let expected = cell.weekday == 2 || cell.weekday == 4;
        assert_eq!(
            cell.tasks.len(),
            if expected { 1 } else { 0 },
            "unexpected cell content on {} ({})",
            cell.date,
            view::day_label(cell.weekday),
        );
    }
}

#[tokio::test]
async fn toggling_completion_round_trips_through_the_server() {
    init_logging();

    let session = Session::new("user-1");
    let mock = MockApi::new();
    let mut store = TaskStore::new();

    let mut draft = TaskDraft::new();
    draft.set_title("Apply sunscreen");
    let new_task = draft.submit(session.user()).unwrap();

    let date = today();
    store.load_for_window(&mock, Some(&session), date).await;
    assert!(store.create_task(&mock, &session, new_task).await);

    let task_id = store.tasks()[0].id().clone();
    assert_eq!(store.tasks()[0].completed(), false);

    // First toggle issues a "complete"; the state only changes after the reload
    assert!(store.toggle_completion(&mock, &session, &task_id, date).await);
    assert!(store.tasks()[0].completed());
    assert!(mock.is_completed_on(&task_id, date));

    // Completion is a per-date record: other dates are still pending
    assert_eq!(mock.is_completed_on(&task_id, date + Duration::days(1)), false);

    // Second toggle issues an "uncomplete" and reverses the state
    assert!(store.toggle_completion(&mock, &session, &task_id, date).await);
    assert_eq!(store.tasks()[0].completed(), false);
    assert_eq!(mock.is_completed_on(&task_id, date), false);
}

#[tokio::test]
async fn week_navigation_reloads_and_round_trips() {
    init_logging();

    let session = Session::new("user-1");
    let mock = MockApi::new();
    let mut store = TaskStore::new();
    let mut page = SchedulerView::new(today());

    let original = page.reference_date();
    store.load_for_window(&mock, Some(&session), original).await;
    assert_eq!(mock.requests_served(), 1);

    let previous = page.previous_week();
    assert_eq!(previous, original - Duration::days(7));
    store.load_for_window(&mock, Some(&session), previous).await;

    let back = page.next_week();
    assert_eq!(back, original);
    store.load_for_window(&mock, Some(&session), back).await;

    // One request per displayed window, and the store ends up on the original one
    assert_eq!(mock.requests_served(), 3);
    assert_eq!(store.window(), Some(original));
}

#[tokio::test]
async fn scheduling_a_routine_linked_task() {
    init_logging();

    let session = Session::new("user-1");
    let mock = MockApi::new();
    mock.add_routine(Routine::new("r-1", "Morning glow"));
    mock.add_routine(Routine::new("r-2", "Evening repair"));

    // The picker is filled from the service when the form switches to routine-linked
    let routines = mock.routines(&session).await.unwrap();
    assert_eq!(routines.len(), 2);

    let mut draft = TaskDraft::new();
    draft.choose_kind(KindChoice::RoutineLinked);
    assert_eq!(draft.can_submit(), false);

    draft.select_routine(routines[0].clone());
    assert_eq!(draft.title(), "Morning glow");
    draft.select_routine(routines[1].clone());
    assert_eq!(draft.title(), "Evening repair");

    let mut store = TaskStore::new();
    store.load_for_window(&mock, Some(&session), today()).await;
    let new_task = draft.submit(session.user()).unwrap();
    assert!(store.create_task(&mock, &session, new_task).await);

    assert_eq!(
        store.tasks()[0].kind(),
        &TaskKind::RoutineLinked(RoutineId::from("r-2"))
    );
    assert_eq!(store.tasks()[0].title(), "Evening repair");
}

#[tokio::test]
async fn a_flaky_service_leaves_the_store_retryable() {
    init_logging();

    let session = Session::new("user-1");
    let mock = MockApi::with_behaviour(MockBehaviour::fail_now(1));
    let mut store = TaskStore::new();

    assert_eq!(
        store.load_for_window(&mock, Some(&session), today()).await,
        false
    );
    match store.state() {
        LoadState::Failed(message) => assert!(message.contains("mocked")),
        other => panic!("Expected a Failed state, got {:?}", other),
    }

    // No automatic retry happened: the user triggers the next attempt
    assert_eq!(mock.requests_served(), 1);
    assert!(store.load_for_window(&mock, Some(&session), today()).await);
    assert_eq!(store.state(), &LoadState::Loaded);
}

#[tokio::test]
async fn daily_tasks_occupy_every_cell_of_the_week() {
    init_logging();

    let session = Session::new("user-1");
    let mock = MockApi::new();
    let mut store = TaskStore::new();

    let mut draft = TaskDraft::new();
    draft.set_title("Moisturize");
    assert_eq!(draft.schedule(), Schedule::Daily);
    assert_eq!(draft.days_of_week(), Weekdays::every_day());

    store.load_for_window(&mock, Some(&session), today()).await;
    let new_task = draft.submit(session.user()).unwrap();
    assert!(store.create_task(&mock, &session, new_task).await);

    let grid = view::week_grid(store.tasks(), today());
    assert!(grid.iter().all(|cell| cell.tasks.len() == 1));
}
