use capsule_timeline::api::{FetchOutcome, StaticEventSource, TimelineConfig, TimelineEngine};
use capsule_timeline::core::{EventLevel, RawEvent};
use capsule_timeline::interaction::DragMode;
use capsule_timeline::render::NullRenderer;

const T0: f64 = 1_700_000_000_000.0;
const HOUR: f64 = 3_600_000.0;

#[test]
fn engine_smoke_flow() {
    let config = TimelineConfig::default().with_container_width(1_000.0);
    let mut engine = TimelineEngine::new(NullRenderer::default(), config, T0).expect("engine init");

    let mut source = StaticEventSource::new().with_camera(
        "cam-1",
        vec![
            RawEvent::at_millis(T0 + HOUR, EventLevel::Warning, "motion"),
            RawEvent::at_millis(T0 + 6.0 * HOUR, EventLevel::Info, "person"),
            RawEvent::at_millis(T0 + 6.0 * HOUR + 1_000.0, EventLevel::Error, "tamper"),
        ],
    );
    let outcome = engine.load_camera(&mut source, "cam-1").expect("load");
    assert_eq!(
        outcome,
        FetchOutcome::Applied {
            accepted: 3,
            dropped: 0
        }
    );

    {
        let clusters = engine.clusters().expect("clusters");
        assert_eq!(clusters.len(), 2);
        assert!(clusters[0].is_single());
        assert_eq!(clusters[1].len(), 2);
    }

    assert!(engine.pointer_down(500.0).expect("down"));
    assert_eq!(engine.drag_mode(), DragMode::Dragging);
    engine.pointer_move(520.0).expect("move");
    engine.pointer_up();
    assert_eq!(engine.drag_mode(), DragMode::Idle);

    engine.render().expect("render");
    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_marker_count, 2);
    assert!(renderer.last_cursor_x.is_some());
}

#[test]
fn engine_rejects_invalid_bootstrap() {
    let err = TimelineEngine::new(NullRenderer::default(), TimelineConfig::default(), f64::NAN)
        .err()
        .expect("nan initial time must fail");
    assert!(matches!(err, capsule_timeline::TimelineError::InvalidData(_)));

    let config = TimelineConfig::default().with_follow_margin_ratio(0.5);
    assert!(TimelineEngine::new(NullRenderer::default(), config, T0).is_err());
}

#[test]
fn telemetry_init_is_safe_to_call() {
    let first = capsule_timeline::telemetry::init_default_tracing();
    let second = capsule_timeline::telemetry::init_tracing_with_fallback("capsule_timeline=trace");
    assert!(!second || !first);
}
