use capsule_timeline::core::Viewport;
use proptest::prelude::*;

proptest! {
    #[test]
    fn pan_then_reverse_pan_restores_window(
        min in -1.0e12f64..1.0e12,
        span in 1_000.0f64..1.0e9,
        delta in -5_000.0f64..5_000.0,
        width in 10.0f64..4_000.0
    ) {
        let viewport = Viewport::new(min, min + span).expect("viewport");
        let panned = viewport.pan(delta, width).expect("pan");
        let restored = panned.pan(-delta, width).expect("reverse pan");
        let tolerance = span * 1e-9 + min.abs() * 1e-12 + 1e-6;
        prop_assert!((restored.min() - viewport.min()).abs() <= tolerance);
        prop_assert!((restored.max() - viewport.max()).abs() <= tolerance);
    }

    #[test]
    fn pan_and_advance_preserve_span(
        min in -1.0e12f64..1.0e12,
        span in 1_000.0f64..1.0e9,
        delta in -5_000.0f64..5_000.0,
        cursor_offset in -2.0f64..3.0,
        margin in 0.0f64..0.49
    ) {
        let viewport = Viewport::new(min, min + span).expect("viewport");
        let tolerance = span * 1e-9 + min.abs() * 1e-12 + 1e-6;

        let panned = viewport.pan(delta, 1_000.0).expect("pan");
        prop_assert!((panned.span() - span).abs() <= tolerance);

        let cursor = min + cursor_offset * span;
        let advanced = viewport.advance(cursor, margin).expect("advance");
        prop_assert!((advanced.span() - span).abs() <= tolerance);
    }

    #[test]
    fn advance_keeps_cursor_inside_margins(
        span in 1_000.0f64..1.0e9,
        cursor_offset in -3.0f64..4.0,
        margin in 0.0f64..0.49
    ) {
        let viewport = Viewport::new(0.0, span).expect("viewport");
        let cursor = cursor_offset * span;
        let advanced = viewport.advance(cursor, margin).expect("advance");
        let margin_ms = span * margin;
        let tolerance = span * 1e-9 + 1e-6;
        prop_assert!(cursor >= advanced.min() + margin_ms - tolerance);
        prop_assert!(cursor <= advanced.max() - margin_ms + tolerance);
    }
}

proptest! {
    #[test]
    fn cursor_inside_dead_zone_leaves_window_unchanged(
        min in -1.0e12f64..1.0e12,
        span in 1_000.0f64..1.0e9,
        margin in 0.0f64..0.49,
        position in 0.0f64..=1.0
    ) {
        let viewport = Viewport::new(min, min + span).expect("viewport");
        let margin_ms = viewport.span() * margin;
        let low = viewport.min() + margin_ms;
        let high = viewport.max() - margin_ms;
        let cursor = (low + (high - low) * position).clamp(low, high);

        let advanced = viewport.advance(cursor, margin).expect("advance");
        prop_assert_eq!(advanced, viewport);
    }
}
