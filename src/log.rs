//! Logging port for diagnostic tracing.
//!
//! The engine never logs through process-global mutable state. Hosts inject
//! a [`LogSink`] at construction time; the default [`NullLog`] makes every
//! statement a no-op, and [`TracingLog`] forwards to the `tracing`
//! ecosystem. Messages are passed as closures so they are only built when
//! the current level lets them through.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Log verbosity, ordered from silent to most verbose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No diagnostic output.
    #[default]
    Off,
    /// Infrequent lifecycle events (model replaced, config applied).
    Info,
    /// Structural recomputation details.
    Debug,
    /// Per-tick output. Very noisy; scroll ticks log at this level.
    Trace,
}

/// Destination for diagnostic messages.
pub trait LogSink {
    /// Write one formatted message. `prefix` names the emitting component.
    fn emit(&self, level: LogLevel, prefix: &str, message: &str);
}

/// Sink that discards everything. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl LogSink for NullLog {
    fn emit(&self, _level: LogLevel, _prefix: &str, _message: &str) {}
}

/// Sink that forwards to the `tracing` macros, so hosts with a subscriber
/// installed get engine diagnostics alongside their own spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn emit(&self, level: LogLevel, prefix: &str, message: &str) {
        match level {
            LogLevel::Off => {}
            LogLevel::Info => tracing::info!(target: "matview", "{prefix}{message}"),
            LogLevel::Debug => tracing::debug!(target: "matview", "{prefix}{message}"),
            LogLevel::Trace => tracing::trace!(target: "matview", "{prefix}{message}"),
        }
    }
}

/// Per-component logging handle: a shared sink, a component prefix and the
/// currently configured level. Cheap to clone.
#[derive(Clone)]
pub(crate) struct Log {
    sink: Arc<dyn LogSink>,
    prefix: &'static str,
    level: LogLevel,
}

impl Log {
    pub(crate) fn new(sink: Arc<dyn LogSink>, prefix: &'static str) -> Self {
        Self {
            sink,
            prefix,
            level: LogLevel::Off,
        }
    }

    /// Update the level, usually after a config change.
    pub(crate) fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub(crate) fn info(&self, message: impl FnOnce() -> String) {
        if self.level >= LogLevel::Info {
            self.sink.emit(LogLevel::Info, self.prefix, &message());
        }
    }

    pub(crate) fn debug(&self, message: impl FnOnce() -> String) {
        if self.level >= LogLevel::Debug {
            self.sink.emit(LogLevel::Debug, self.prefix, &message());
        }
    }

    pub(crate) fn trace(&self, message: impl FnOnce() -> String) {
        if self.level >= LogLevel::Trace {
            self.sink.emit(LogLevel::Trace, self.prefix, &message());
        }
    }
}
