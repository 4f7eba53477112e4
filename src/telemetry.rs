//! Opt-in `tracing` bootstrap for hosts embedding `capsule-timeline`.
//!
//! The engine only emits events; installing a subscriber is left to the host.
//! With the `telemetry` feature the helpers below install a compact `fmt`
//! subscriber filtered by `RUST_LOG`, or by a fallback directive when unset.

/// Fallback filter: timeline diagnostics at `info`, everything else at `warn`.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "warn,capsule_timeline=info";

/// Installs the compact subscriber with [`DEFAULT_TRACING_DIRECTIVE`] as fallback.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_TRACING_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"capsule_timeline=trace"` to watch per-move pan deltas.
#[must_use]
pub fn init_tracing_with_fallback(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(directive))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_DIRECTIVE));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
