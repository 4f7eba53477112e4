use std::cell::RefCell;
use std::rc::Rc;

use capsule_timeline::api::{MarkerActivation, StaticEventSource, TimelineConfig, TimelineEngine};
use capsule_timeline::core::{EventLevel, RawEvent};
use capsule_timeline::extensions::{
    TimeCallbacks, TimelineContext, TimelineEvent, TimelineObserver,
};
use capsule_timeline::render::NullRenderer;

const T0: f64 = 1_700_000_000_000.0;
const HOUR: f64 = 3_600_000.0;

struct Recorder {
    events: Rc<RefCell<Vec<TimelineEvent>>>,
}

impl TimelineObserver for Recorder {
    fn id(&self) -> &str {
        "recorder"
    }

    fn on_event(&mut self, event: TimelineEvent, _context: TimelineContext) {
        self.events.borrow_mut().push(event);
    }
}

fn scrub_events(events: &Rc<RefCell<Vec<TimelineEvent>>>) -> Vec<TimelineEvent> {
    events
        .borrow()
        .iter()
        .copied()
        .filter(|event| {
            matches!(
                event,
                TimelineEvent::TimeChanging { .. }
                    | TimelineEvent::TimeCommitted { .. }
                    | TimelineEvent::CursorSynced { .. }
            )
        })
        .collect()
}

fn loaded_engine() -> (TimelineEngine<NullRenderer>, Rc<RefCell<Vec<TimelineEvent>>>) {
    let config = TimelineConfig::default().with_container_width(1_000.0);
    let mut engine = TimelineEngine::new(NullRenderer::default(), config, T0).expect("engine init");
    let mut source = StaticEventSource::new().with_camera(
        "lobby",
        vec![
            RawEvent::at_millis(T0 + HOUR, EventLevel::Info, "door"),
            RawEvent::at_millis(T0 + 8.0 * HOUR, EventLevel::Warning, "motion"),
            RawEvent::at_millis(T0 + 8.0 * HOUR + 500.0, EventLevel::Error, "tamper"),
            RawEvent::at_millis(T0 + 8.0 * HOUR + 900.0, EventLevel::Verbose, "heartbeat"),
        ],
    );
    engine.load_camera(&mut source, "lobby").expect("load");

    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_observer(Box::new(Recorder {
            events: Rc::clone(&events),
        }))
        .expect("register");
    (engine, events)
}

#[test]
fn clicking_single_event_marker_changes_then_commits() {
    let (mut engine, events) = loaded_engine();

    let activation = engine.click_marker(0).expect("click");
    assert_eq!(activation, MarkerActivation::Committed { time: T0 + HOUR });

    assert_eq!(
        scrub_events(&events),
        vec![
            TimelineEvent::TimeChanging { time: T0 + HOUR },
            TimelineEvent::TimeCommitted { time: T0 + HOUR },
        ]
    );
    assert!(!engine.cursor().is_scrubbing());
    assert_eq!(engine.cursor().committed(), T0 + HOUR);
}

#[test]
fn clicking_cluster_opens_detail_without_committing() {
    let (mut engine, events) = loaded_engine();

    let activation = engine.click_marker(1).expect("click");
    assert_eq!(
        activation,
        MarkerActivation::DetailOpened {
            cluster_index: 1,
            rows: 3
        }
    );
    assert!(scrub_events(&events).is_empty());

    let detail = engine.detail().expect("detail open");
    let titles: Vec<&str> = detail.rows.iter().map(|row| row.title.as_str()).collect();
    assert_eq!(titles, vec!["motion", "tamper", "heartbeat"]);
}

#[test]
fn selecting_detail_row_commits_and_closes_detail() {
    let (mut engine, events) = loaded_engine();
    engine.click_marker(1).expect("click");

    let time = engine.select_detail_item(1).expect("select");
    assert_eq!(time, T0 + 8.0 * HOUR + 500.0);
    assert!(engine.detail().is_none());
    assert_eq!(
        scrub_events(&events),
        vec![
            TimelineEvent::TimeChanging { time },
            TimelineEvent::TimeCommitted { time },
        ]
    );
    assert!(
        events
            .borrow()
            .contains(&TimelineEvent::ClusterDetailClosed)
    );
}

#[test]
fn closing_detail_does_not_commit() {
    let (mut engine, events) = loaded_engine();
    engine.click_marker(1).expect("click");

    assert!(engine.close_detail());
    assert!(!engine.close_detail());
    assert!(scrub_events(&events).is_empty());
    assert!(engine.select_detail_item(0).is_err());
}

#[test]
fn detail_row_out_of_range_is_rejected() {
    let (mut engine, _) = loaded_engine();
    engine.click_marker(1).expect("click");
    assert!(engine.select_detail_item(9).is_err());
    assert!(engine.detail().is_some());
}

#[test]
fn out_of_range_marker_is_rejected() {
    let (mut engine, _) = loaded_engine();
    assert!(engine.click_marker(7).is_err());
}

#[test]
fn slider_emits_changes_continuously_and_commits_once() {
    let (mut engine, events) = loaded_engine();

    engine.slider_change(T0 + 2.0 * HOUR).expect("change");
    engine.slider_change(T0 + 3.0 * HOUR).expect("change");
    assert!(engine.cursor().is_scrubbing());
    assert_eq!(engine.cursor().committed(), T0);
    assert_eq!(engine.cursor().displayed(), T0 + 3.0 * HOUR);

    engine.slider_commit(T0 + 3.0 * HOUR).expect("commit");
    assert!(!engine.cursor().is_scrubbing());

    let commits = scrub_events(&events)
        .into_iter()
        .filter(|event| matches!(event, TimelineEvent::TimeCommitted { .. }))
        .count();
    let changes = scrub_events(&events)
        .into_iter()
        .filter(|event| matches!(event, TimelineEvent::TimeChanging { .. }))
        .count();
    assert_eq!(commits, 1);
    assert_eq!(changes, 2);
}

#[test]
fn external_seek_moves_cursor_without_echoing_commit() {
    let (mut engine, events) = loaded_engine();
    engine.slider_change(T0 + 2.0 * HOUR).expect("change");

    engine.seek_to(T0 + 4.0 * HOUR).expect("seek");
    assert!(!engine.cursor().is_scrubbing());
    assert_eq!(engine.cursor().committed(), T0 + 4.0 * HOUR);

    let recorded = scrub_events(&events);
    assert_eq!(
        recorded,
        vec![
            TimelineEvent::TimeChanging {
                time: T0 + 2.0 * HOUR
            },
            TimelineEvent::CursorSynced {
                time: T0 + 4.0 * HOUR
            },
        ]
    );
}

#[test]
fn click_at_pixel_hits_marker_under_pointer() {
    let (mut engine, _) = loaded_engine();
    let x = engine.time_to_pixel(T0 + HOUR).expect("laid out");

    let activation = engine.click_at_pixel(x + 3.0).expect("click");
    assert_eq!(activation, Some(MarkerActivation::Committed { time: T0 + HOUR }));

    let miss = engine.click_at_pixel(x + 150.0).expect("click");
    assert_eq!(miss, None);
}

#[test]
fn slider_change_at_pixel_maps_track_position() {
    let (mut engine, _) = loaded_engine();
    engine.slider_change_at_pixel(500.0).expect("change");
    let expected = engine.viewport().min() + 0.5 * engine.viewport().span();
    assert!((engine.cursor().displayed() - expected).abs() < 1e-3);
}

#[test]
fn time_callbacks_receive_scrub_channels() {
    let (mut engine, _) = loaded_engine();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let commits = Rc::new(RefCell::new(Vec::new()));

    let changes_sink = Rc::clone(&changes);
    let commits_sink = Rc::clone(&commits);
    engine
        .register_observer(Box::new(
            TimeCallbacks::new("player")
                .on_time_change(move |time| changes_sink.borrow_mut().push(time))
                .on_time_commit(move |time| commits_sink.borrow_mut().push(time)),
        ))
        .expect("register");

    engine.slider_change(T0 + HOUR).expect("change");
    engine.slider_commit(T0 + HOUR).expect("commit");
    engine.seek_to(T0 + 5.0 * HOUR).expect("seek");

    assert_eq!(*changes.borrow(), vec![T0 + HOUR]);
    assert_eq!(*commits.borrow(), vec![T0 + HOUR]);
}

#[test]
fn observers_are_unique_and_removable() {
    let (mut engine, _) = loaded_engine();
    assert!(engine.has_observer("recorder"));
    let duplicate = engine.register_observer(Box::new(Recorder {
        events: Rc::new(RefCell::new(Vec::new())),
    }));
    assert!(duplicate.is_err());
    assert_eq!(engine.observer_count(), 1);

    assert!(engine.unregister_observer("recorder"));
    assert!(!engine.unregister_observer("recorder"));
    assert_eq!(engine.observer_count(), 0);
}

#[test]
fn reopening_a_cluster_closes_the_previous_detail_first() {
    let (mut engine, events) = loaded_engine();
    engine.click_marker(1).expect("first open");
    engine.click_marker(1).expect("second open");

    let lifecycle: Vec<TimelineEvent> = events
        .borrow()
        .iter()
        .copied()
        .filter(|event| {
            matches!(
                event,
                TimelineEvent::ClusterDetailOpened { .. } | TimelineEvent::ClusterDetailClosed
            )
        })
        .collect();
    assert_eq!(
        lifecycle,
        vec![
            TimelineEvent::ClusterDetailOpened {
                cluster_index: 1,
                rows: 3
            },
            TimelineEvent::ClusterDetailClosed,
            TimelineEvent::ClusterDetailOpened {
                cluster_index: 1,
                rows: 3
            },
        ]
    );
    assert!(engine.detail().is_some());
}

#[test]
fn refetching_same_camera_closes_stale_detail() {
    let (mut engine, events) = loaded_engine();
    engine.click_marker(1).expect("open detail");
    assert_eq!(engine.snapshot().expect("snapshot").open_detail, Some(1));

    let mut source = StaticEventSource::new().with_camera(
        "lobby",
        vec![RawEvent::at_millis(T0 + 3.0 * HOUR, EventLevel::Info, "door")],
    );
    engine.load_camera(&mut source, "lobby").expect("refetch");

    assert!(engine.detail().is_none());
    assert_eq!(engine.snapshot().expect("snapshot").open_detail, None);
    assert!(
        events
            .borrow()
            .contains(&TimelineEvent::ClusterDetailClosed)
    );
}
