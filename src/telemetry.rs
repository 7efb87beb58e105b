//! Optional `tracing` subscriber setup for hosts embedding `datagear`.
//!
//! Events are emitted under the module targets of the crate:
//! - `datagear::analysis` logs plugin registration, widget renders, render
//!   option resolution and each script section written (`trace`).
//! - `datagear::dataexchange` logs batch submission, rejected sub exchanges
//!   (`warn`), job completion and failures, and the first failing slot of a
//!   batch join.
//! - `datagear::persistence` logs `file:` values naming missing files (`trace`).
//!
//! Hosts with their own subscriber can ignore this module entirely.

/// Filter used when `RUST_LOG` is unset: host output at `info`, exchange
/// lifecycle at `debug`.
pub const DEFAULT_FILTER_DIRECTIVES: &str = "info,datagear::dataexchange=debug";

/// Installs a compact fmt subscriber when the `telemetry` feature is enabled.
///
/// `RUST_LOG` wins over [`DEFAULT_FILTER_DIRECTIVES`]. Returns `false` when the
/// feature is disabled or a global subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER_DIRECTIVES)
}

/// Same as [`init_default_tracing`] with caller-chosen fallback directives.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}
