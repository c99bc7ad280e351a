//! `call_log` provides declarative call logging based on the [`tracing`] ecosystem.
//!
//! Types and their methods are described once in a [`DirectiveRegistry`], together with the
//! directives stating which calls should be logged, at which level, and with which arguments.
//! Calls wrapped with a [`CallInterceptor`] are then logged after they complete successfully,
//! without the called code performing any logging itself.
//!
//! It offers:
//! - [`TypeDirective`]s establishing a default policy for all methods of a type, with
//!   [`MethodOverride`]s flipping that default for individual methods.
//! - [`MethodDirective`]s opting individual methods in, superseding any type directive.
//! - Parameters whose values are kept out of log lines
//!   ([`MethodSpec::excluded_param`]).
//! - A [`Dispatcher`] that checks whether the logger is enabled before rendering any value,
//!   and a [`JsonRenderer`] that renders values as JSON, falling back to their
//!   [`Debug`][std::fmt::Debug] form.
//! - A [`TracingLoggerFactory`] emitting log lines as [`tracing`] events with the `call_log`
//!   target.
//!
//! # Example
//!
//! ```
//! use call_log::{
//!     CallInterceptor, DirectiveRegistry, Dispatcher, JsonRenderer, Level, MethodDirective,
//!     MethodSpec, TracingLoggerFactory, TypeDirective, TypeSpec, call_args,
//! };
//!
//! struct Calculator;
//!
//! impl Calculator {
//!     fn add(&self, a: i64, b: i64) -> i64 {
//!         a + b
//!     }
//!
//!     fn reset(&self) {}
//! }
//!
//! let registry = DirectiveRegistry::new().with_type(
//!     TypeSpec::new("Calculator")
//!         .with_directive(TypeDirective::default())
//!         .method(
//!             MethodSpec::new("add")
//!                 .param("a")
//!                 .param("b")
//!                 .with_directive(MethodDirective {
//!                     include_result: true,
//!                     level: Level::INFO,
//!                 }),
//!         )
//!         .method(MethodSpec::new("reset").returns_unit().exclude()),
//! );
//!
//! let renderer: JsonRenderer = JsonRenderer::default();
//! let interceptor =
//!     CallInterceptor::new(registry, Dispatcher::new(TracingLoggerFactory, renderer));
//!
//! tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();
//!
//! let calculator = Calculator;
//! let (a, b) = (3, 4);
//!
//! // Logs "add(a=3, b=4): 7" at the INFO level
//! let sum = interceptor.invoke("Calculator", "add", &call_args![a, b], || calculator.add(a, b));
//! assert_eq!(sum, 7);
//!
//! // Not logged, the method is excluded
//! interceptor.run("Calculator", "reset", &[], || calculator.reset());
//! ```

mod backend;
mod dispatcher;
mod formatter;
mod registry;
mod render;
mod resolver;
mod severity;

pub use tracing::Level;

pub use self::{
    backend::{Logger, LoggerFactory, TracingLogger, TracingLoggerFactory},
    dispatcher::{CallEvent, CallInterceptor, Dispatcher},
    formatter::format_message,
    registry::{
        DirectiveRegistry, MethodDirective, MethodOverride, MethodSpec, ParameterSpec,
        TypeDirective, TypeSpec,
    },
    render::{JsonRenderer, Renderable, ValueRenderer},
    resolver::{EffectiveDirective, resolve},
    severity::{Severity, emit, is_active},
};

/// The target of the `tracing` events emitted by this crate.
pub const TARGET: &str = "call_log";

/// Errors that can occur within the call logger.
#[derive(Debug, thiserror::Error)]
pub enum CallLogError {
    /// Represents an error in configuration, such as a directive level that call logs cannot
    /// be emitted at.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
