// File: crates/kbar/src/telemetry.rs
// Summary: Opt-in tracing subscriber setup so font-resolution diagnostics reach stderr.

/// Installs a compact `tracing` subscriber (`RUST_LOG`, default `info`).
///
/// Returns `false` when the `telemetry` feature is off or a global subscriber
/// is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
