//! Opaque hooks the engine calls out to for observability. Every method is
//! infallible by signature: a logging/metrics failure must never be able to
//! affect a decision, so there is nothing for a caller to propagate.

use std::time::Duration;

use crate::domain::cards::Card;
use crate::domain::state::PlayerId;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

pub trait InstrumentationSink: Send + Sync {
    fn decision_start(&self, _observer: PlayerId) {}
    fn decision_end(&self, _chosen: Option<Card>, _iterations: u32, _elapsed: Duration) {}
    fn determinization(&self, _attempts: u32, _degraded: bool) {}
    fn error(&self, _message: &str) {}
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Default sink: every hook is a no-op. Safe to use when the caller has no
/// observability pipeline wired up.
pub struct NoopSink;

impl InstrumentationSink for NoopSink {}

/// Forwards every hook into `tracing`, at the log level matching the event's
/// severity. This is the sink the engine's own test harness and any caller
/// that already runs a `tracing` subscriber would reach for.
pub struct TracingSink;

impl InstrumentationSink for TracingSink {
    fn decision_start(&self, observer: PlayerId) {
        tracing::debug!(observer, "ismcts decision start");
    }

    fn decision_end(&self, chosen: Option<Card>, iterations: u32, elapsed: Duration) {
        tracing::info!(
            ?chosen,
            iterations,
            elapsed_ms = elapsed.as_millis() as u64,
            "ismcts decision end"
        );
    }

    fn determinization(&self, attempts: u32, degraded: bool) {
        if degraded {
            tracing::warn!(attempts, "determinization degraded to unconstrained deal");
        } else {
            tracing::trace!(attempts, "determinization succeeded");
        }
    }

    fn error(&self, message: &str) {
        tracing::error!(message, "ismcts error");
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }
    }
}
