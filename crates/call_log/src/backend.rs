//! The logger backend seam, and its [`tracing`] implementation.

use crate::{TARGET, severity::Severity};

/// A named logger that call logs are written to.
///
/// Implementations are expected to serialize their own writes, since calls may be logged from
/// several threads at once.
pub trait Logger {
    /// Whether a message at `severity` would currently be written.
    fn is_enabled(&self, severity: Severity) -> bool;

    /// Writes `message` at `severity`.
    fn log(&self, severity: Severity, message: &str);
}

/// Looks up the [`Logger`] for the runtime type a call was made on.
pub trait LoggerFactory {
    /// The logger handed out by this factory.
    type Logger: Logger;

    /// Obtains the logger for the type named `type_name`.
    fn logger(&self, type_name: &str) -> Self::Logger;
}

/// A [`LoggerFactory`] handing out [`TracingLogger`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLoggerFactory;

impl LoggerFactory for TracingLoggerFactory {
    type Logger = TracingLogger;

    fn logger(&self, type_name: &str) -> Self::Logger {
        TracingLogger {
            name: type_name.to_owned(),
        }
    }
}

/// A [`Logger`] that emits [`tracing`] events.
///
/// Events are emitted with the `call_log` target and carry the name of the logger in the
/// `logger` field, so they can be filtered with directives such as `call_log=debug`.
#[derive(Clone, Debug)]
pub struct TracingLogger {
    name: String,
}

impl TracingLogger {
    /// The name of the type this logger was obtained for.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Logger for TracingLogger {
    fn is_enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Info => tracing::enabled!(target: TARGET, tracing::Level::INFO),
            Severity::Debug => tracing::enabled!(target: TARGET, tracing::Level::DEBUG),
            Severity::Trace => tracing::enabled!(target: TARGET, tracing::Level::TRACE),
        }
    }

    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!(target: TARGET, logger = %self.name, "{message}"),
            Severity::Debug => tracing::debug!(target: TARGET, logger = %self.name, "{message}"),
            Severity::Trace => tracing::trace!(target: TARGET, logger = %self.name, "{message}"),
        }
    }
}
