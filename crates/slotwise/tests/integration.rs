//! Integration tests for slotwise
//!
//! These tests drive the scheduling session end to end against the mock
//! and fixture backends.

use chrono::{NaiveDate, NaiveDateTime};
use slotwise::{Fixture, FixtureBackend, SchedulingSession, SharedState};
use slotwise_api::{BusyBlock, ConfirmationRequest, InitiateRequest, MeetingInitiation, WireTimeRange};
use slotwise_backend_api::{BackendError, MockBackend, SchedulingBackend};
use slotwise_config::{DurationMode, Settings};
use slotwise_core::{DragOutcome, MoveDrag, Pointer, blocks_for_day};
use slotwise_util::{DayPoint, Hours, IntentCode, day_index};
use std::sync::Arc;

fn h(v: f64) -> Hours {
    Hours::from_hours(v)
}

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn morning() -> NaiveDateTime {
    reference().and_hms_opt(8, 40, 0).unwrap()
}

fn fixture_path() -> String {
    format!("{}/fixtures/week.json", env!("CARGO_MANIFEST_DIR"))
}

fn mock_backend() -> Arc<MockBackend> {
    let backend = MockBackend::new().with_initiation(MeetingInitiation {
        duration_minutes: 60,
        default_title: "Planning".into(),
        intent_code: IntentCode::new("abc"),
        suggested_slots: vec![WireTimeRange::new(
            "2025-06-04T10:00:00Z",
            "2025-06-04T11:00:00Z",
        )],
    });
    backend.add_block(
        day_index(reference()) + 1,
        BusyBlock::new("work:team", "Review", h(12.5), h(1.0)),
    );
    Arc::new(backend)
}

#[tokio::test]
async fn test_session_flow() {
    let backend = mock_backend();
    let state = SharedState::new();
    let mut session =
        SchedulingSession::new(backend.clone(), Settings::default(), reference(), state.clone());

    let seeded = session.start(InitiateRequest::default(), morning()).await.unwrap();
    assert_eq!(seeded, 1);
    assert_eq!(session.coordinator().duration(), h(1.0));
    assert_eq!(session.coordinator().floor(), DayPoint::new(0, h(8.75)));

    session.load_blocks(session.window_around(1)).await.unwrap();
    assert_eq!(session.coordinator().busy_blocks_for(1).len(), 1);

    // 12:30 on day 1 is busy; 13:30 and 11:30 tie, the forward hit wins
    assert!(session.add_near(1, h(12.5)));
    let slots = session.coordinator().slots().to_vec();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].position(), DayPoint::new(1, h(13.5)));
    assert_eq!(state.get().slots, slots);
    assert_eq!(state.get().selected, Some(1));

    let (proposal, message) = session.submit().await.unwrap();
    assert_eq!(proposal.intent_code, Some(IntentCode::new("abc")));
    assert_eq!(proposal.times.len(), 2);
    assert_eq!(proposal.times[0].start_date_time, "2025-06-04T10:00:00Z");
    assert_eq!(proposal.times[1].start_date_time, "2025-06-03T13:30:00Z");
    assert!(message.contains("2 option(s)"));
    assert_eq!(backend.submitted(), vec![proposal]);

    assert!(session.coordinator().is_locked());
    assert!(state.get().locked);

    // read-only after submission
    assert!(!session.add_near(0, h(10.0)));
}

#[tokio::test]
async fn test_failed_submit_leaves_working_set() {
    let backend = mock_backend();
    let mut session =
        SchedulingSession::new(backend.clone(), Settings::default(), reference(), SharedState::new());

    session.start(InitiateRequest::default(), morning()).await.unwrap();
    session.add_near(0, h(10.0));
    let before = session.coordinator().slots().to_vec();

    backend.set_fail_submit(true);
    let result = session.submit().await;
    assert!(matches!(result, Err(BackendError::Http { code: 502, .. })));
    assert_eq!(session.coordinator().slots(), before.as_slice());
    assert!(!session.coordinator().is_locked());

    // retrying is the caller's decision
    backend.set_fail_submit(false);
    assert!(session.submit().await.is_ok());
}

#[tokio::test]
async fn test_failed_block_fetch() {
    let backend = mock_backend();
    *backend.fail_blocks.lock().unwrap() = true;
    let mut session =
        SchedulingSession::new(backend, Settings::default(), reference(), SharedState::new());

    let result = session.load_blocks(session.window_around(1)).await;
    assert!(matches!(result, Err(BackendError::Network(_))));
    assert!(session.coordinator().busy_blocks_for(1).is_empty());
}

#[tokio::test]
async fn test_fixture_session() {
    let fixture = Fixture::load(fixture_path()).unwrap();
    let now = fixture.now();
    let reference = fixture.reference;
    let backend = Arc::new(FixtureBackend::new(fixture));

    let mut session =
        SchedulingSession::new(backend.clone(), Settings::default(), reference, SharedState::new());
    assert_eq!(session.start(InitiateRequest::default(), now).await.unwrap(), 1);
    session.load_blocks(session.window_around(1)).await.unwrap();

    let candidates = session.coordinator().candidates_near(1, h(12.5));
    assert_eq!(
        candidates,
        vec![
            DayPoint::new(0, h(13.0)),
            DayPoint::new(0, h(11.0)),
            DayPoint::new(1, h(14.5)),
            DayPoint::new(1, h(11.5)),
            DayPoint::new(2, h(17.0)),
            DayPoint::new(2, h(8.0)),
            DayPoint::new(3, h(12.5)),
        ]
    );

    assert!(session.add_near(1, h(12.5)));
    assert_eq!(
        session.coordinator().slots()[1].position(),
        DayPoint::new(1, h(11.5))
    );

    let (proposal, message) = session.submit().await.unwrap();
    assert!(message.starts_with("Project sync"));

    let receipt = backend
        .confirm(ConfirmationRequest {
            intent_code: IntentCode::new("k7Qx2m"),
            time: proposal.times[1].clone(),
            recipient_email: Some("guest@example.com".into()),
        })
        .await
        .unwrap();
    assert_eq!(receipt.meeting_title, "Project sync");
}

#[test]
fn test_fixture_layout() {
    let fixture = Fixture::load(fixture_path()).unwrap();
    let raw = fixture.dated_blocks().unwrap();

    let day = blocks_for_day(&raw, day_index(fixture.reference) + 1);
    let laid: Vec<_> = day
        .iter()
        .map(|b| (b.title.as_str(), b.stack_depth))
        .collect();
    assert_eq!(
        laid,
        vec![("Design review", 0), ("Dentist", 1), ("Interview", 2)]
    );
    assert!(day[1].is_blocked_time);
}

#[tokio::test]
async fn test_drag_updates_published_state() {
    let backend = mock_backend();
    let state = SharedState::new();
    let mut session = SchedulingSession::new(backend, Settings::default(), reference(), state.clone());
    session.start(InitiateRequest::default(), morning()).await.unwrap();

    let mut rx = state.subscribe();
    rx.borrow_and_update();

    // default grid: 120px per day, 48px per hour
    let mut drag = MoveDrag::new();
    assert!(drag.begin(session.coordinator(), 0, Pointer::new(0.0, 0.0)));
    let preview = drag.sample(session.coordinator(), Pointer::new(-120.0, 96.0));
    assert_eq!(preview, Some(DayPoint::new(1, h(12.0))));
    assert!(!rx.has_changed().unwrap());

    let outcome = drag.end(session.coordinator_mut(), Pointer::new(-120.0, 96.0));
    let Some(DragOutcome::Committed { events, .. }) = outcome else {
        panic!("expected commit");
    };
    session.publish(events);

    assert!(rx.has_changed().unwrap());
    let view = state.get();
    assert_eq!(view.slots[0].position(), DayPoint::new(1, h(12.0)));
    let change = view.last_change.unwrap();
    assert_eq!(change.old.position(), DayPoint::new(2, h(10.0)));
}

#[tokio::test]
async fn test_per_slot_sessions_keep_seed_durations() {
    let backend = MockBackend::new().with_initiation(MeetingInitiation {
        duration_minutes: 30,
        default_title: "Interview".into(),
        intent_code: IntentCode::new("int"),
        suggested_slots: vec![WireTimeRange::new(
            "2025-06-03T09:00:00+02:00",
            "2025-06-03T10:30:00+02:00",
        )],
    });
    let mut settings = Settings::default();
    settings.session.duration_mode = DurationMode::PerSlot;

    let mut session =
        SchedulingSession::new(Arc::new(backend), settings, reference(), SharedState::new());
    session.start(InitiateRequest::default(), morning()).await.unwrap();

    let seed = session.coordinator().slots()[0];
    // offset dropped, digits read as wall-clock time
    assert_eq!(seed.position(), DayPoint::new(1, h(9.0)));
    assert_eq!(seed.duration, h(1.5));

    let events = session.coordinator_mut().resize(0, h(3.0));
    assert!(!events.is_empty());
    assert_eq!(session.coordinator().slots()[0].duration, h(3.0));
}

#[tokio::test]
async fn test_reset_unlocks() {
    let backend = mock_backend();
    let state = SharedState::new();
    let mut session = SchedulingSession::new(backend, Settings::default(), reference(), state.clone());
    session.start(InitiateRequest::default(), morning()).await.unwrap();
    session.submit().await.unwrap();
    assert!(state.get().locked);

    session.reset();
    assert!(!session.coordinator().is_locked());
    assert!(session.coordinator().slots().is_empty());
    assert!(!state.get().locked);
}

#[tokio::test]
async fn test_search_skips_days_booked_beyond_window() {
    let backend = MockBackend::new().with_initiation(MeetingInitiation {
        duration_minutes: 60,
        default_title: "Offsite".into(),
        intent_code: IntentCode::new("busy"),
        suggested_slots: vec![],
    });
    for day in 0..=20 {
        backend.add_block(
            day_index(reference()) + day,
            BusyBlock::new("work:team", "Booked", Hours::ZERO, Hours::DAY),
        );
    }

    let mut session =
        SchedulingSession::new(Arc::new(backend), Settings::default(), reference(), SharedState::new());
    session.start(InitiateRequest::default(), morning()).await.unwrap();

    let range = session.search_range(10);
    assert_eq!(range.first, day_index(reference()));
    assert_eq!(range.last, day_index(reference()) + 89);
    session.load_search_range(10).await.unwrap();

    let candidates = session.coordinator().candidates_near(10, h(9.0));
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|c| c.day_offset == 21));

    assert!(session.add_near(10, h(9.0)));
    assert_eq!(session.coordinator().slots()[0].day_offset, 21);
}

#[tokio::test]
async fn test_start_while_locked_keeps_intent() {
    let backend = mock_backend();
    let mut session =
        SchedulingSession::new(backend.clone(), Settings::default(), reference(), SharedState::new());
    session.start(InitiateRequest::default(), morning()).await.unwrap();
    session.submit().await.unwrap();
    let before = session.coordinator().slots().to_vec();

    backend.set_initiation(MeetingInitiation {
        duration_minutes: 30,
        default_title: "Other".into(),
        intent_code: IntentCode::new("other"),
        suggested_slots: vec![],
    });
    assert_eq!(session.start(InitiateRequest::default(), morning()).await.unwrap(), 0);
    assert_eq!(session.coordinator().intent_code(), Some(&IntentCode::new("abc")));
    assert_eq!(session.coordinator().slots(), before.as_slice());
}
