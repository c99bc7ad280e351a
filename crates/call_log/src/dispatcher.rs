//! Decides whether a completed call is logged, and logs it.

use crate::{
    CallLogError, TARGET,
    backend::LoggerFactory,
    formatter::format_message,
    registry::{DirectiveRegistry, MethodSpec, TypeDirective},
    render::{JsonRenderer, Renderable, ValueRenderer},
    resolver::resolve,
    severity,
};

/// Builds the argument list of a call, in call order, for [`CallInterceptor`] and
/// [`CallEvent`].
///
/// # Example
///
/// ```
/// let user = "ada";
/// let arguments = call_log::call_args![user, 42];
/// assert_eq!(arguments.len(), 2);
/// ```
#[macro_export]
macro_rules! call_args {
    ($($argument:expr),* $(,)?) => {
        [$(&$argument as &dyn $crate::Renderable),*]
    };
}

/// A call that completed successfully.
#[derive(Clone, Copy, Debug)]
pub struct CallEvent<'a> {
    /// The name of the runtime type the method was called on. Used to look up the logger.
    pub target: &'a str,

    /// The method that was called.
    pub method: &'a MethodSpec,

    /// The directive attached to the type declaring the method, if any.
    pub type_directive: Option<&'a TypeDirective>,

    /// The argument values, in call order.
    pub arguments: &'a [&'a dyn Renderable],

    /// The returned value, or `None` if the method returns nothing.
    pub result: Option<&'a dyn Renderable>,
}

/// Logs [`CallEvent`]s according to their directives.
///
/// The dispatcher holds no state besides its collaborators, and may be shared between threads
/// if they can.
#[derive(Clone, Debug)]
pub struct Dispatcher<F, R = JsonRenderer>
where
    F: LoggerFactory,
    R: ValueRenderer,
{
    factory: F,
    renderer: R,
}

impl<F, R> Dispatcher<F, R>
where
    F: LoggerFactory,
    R: ValueRenderer,
{
    /// Creates a new [`Dispatcher`] obtaining loggers from `factory` and rendering values with
    /// `renderer`.
    pub fn new(factory: F, renderer: R) -> Self {
        Self { factory, renderer }
    }

    /// Logs `event` if its directives ask for it and the logger of its target is enabled at
    /// the resolved level.
    ///
    /// No value is rendered unless the log line is actually going to be written.
    ///
    /// # Errors
    ///
    /// Returns [`CallLogError::Configuration`] if the resolved level has no
    /// [`Severity`][crate::Severity] counterpart.
    pub fn handle(&self, event: &CallEvent<'_>) -> Result<(), CallLogError> {
        let Some(directive) = resolve(event.method, event.type_directive) else {
            return Ok(());
        };

        let logger = self.factory.logger(event.target);
        if !severity::is_active(directive.level, &logger)? {
            return Ok(());
        }

        let message = format_message(&directive, event, &self.renderer);
        severity::emit(directive.level, &logger, &message)
    }
}

/// Wraps calls so that they are logged after they complete successfully.
///
/// Types and their methods are looked up in the [`DirectiveRegistry`] by name. A method that
/// is not declared on a registered type gets positional parameter names and is assumed to
/// return a value. Calls on types that are not registered are never logged.
///
/// Logging never changes the outcome of a wrapped call: failures to log are reported as
/// `tracing` errors and otherwise ignored.
#[derive(Clone, Debug)]
pub struct CallInterceptor<F, R = JsonRenderer>
where
    F: LoggerFactory,
    R: ValueRenderer,
{
    registry: DirectiveRegistry,
    dispatcher: Dispatcher<F, R>,
}

impl<F, R> CallInterceptor<F, R>
where
    F: LoggerFactory,
    R: ValueRenderer,
{
    /// Creates a new [`CallInterceptor`] resolving directives from `registry`.
    pub fn new(registry: DirectiveRegistry, dispatcher: Dispatcher<F, R>) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// The registry directives are resolved from.
    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Runs `call`, a call to `method` on `target` with `arguments`, and logs it together with
    /// its returned value.
    pub fn invoke<T, C>(
        &self,
        target: &str,
        method: &str,
        arguments: &[&dyn Renderable],
        call: C,
    ) -> T
    where
        T: Renderable,
        C: FnOnce() -> T,
    {
        let result = call();
        self.observe(target, method, arguments, Some(&result));
        result
    }

    /// Runs `call`, a fallible call to `method` on `target` with `arguments`.
    ///
    /// The call is logged together with its value if it succeeds. Failed calls are not logged.
    ///
    /// # Errors
    ///
    /// Returns the error returned by `call`, unchanged.
    pub fn try_invoke<T, E, C>(
        &self,
        target: &str,
        method: &str,
        arguments: &[&dyn Renderable],
        call: C,
    ) -> Result<T, E>
    where
        T: Renderable,
        C: FnOnce() -> Result<T, E>,
    {
        let result = call()?;
        self.observe(target, method, arguments, Some(&result));
        Ok(result)
    }

    /// Runs `call`, a call to `method` on `target` with `arguments` returning nothing, and
    /// logs it.
    pub fn run<C>(&self, target: &str, method: &str, arguments: &[&dyn Renderable], call: C)
    where
        C: FnOnce(),
    {
        call();
        self.observe(target, method, arguments, None);
    }

    /// Like [`invoke`][Self::invoke], logging the call under the type of `target`, as named by
    /// [`std::any::type_name_of_val`]. Register the type with [`TypeSpec::of`].
    ///
    /// [`TypeSpec::of`]: crate::TypeSpec::of
    pub fn invoke_on<S, T, C>(
        &self,
        target: &S,
        method: &str,
        arguments: &[&dyn Renderable],
        call: C,
    ) -> T
    where
        S: ?Sized,
        T: Renderable,
        C: FnOnce() -> T,
    {
        self.invoke(std::any::type_name_of_val(target), method, arguments, call)
    }

    /// Like [`try_invoke`][Self::try_invoke], logging the call under the type of `target`.
    ///
    /// # Errors
    ///
    /// Returns the error returned by `call`, unchanged.
    pub fn try_invoke_on<S, T, E, C>(
        &self,
        target: &S,
        method: &str,
        arguments: &[&dyn Renderable],
        call: C,
    ) -> Result<T, E>
    where
        S: ?Sized,
        T: Renderable,
        C: FnOnce() -> Result<T, E>,
    {
        self.try_invoke(std::any::type_name_of_val(target), method, arguments, call)
    }

    /// Like [`run`][Self::run], logging the call under the type of `target`.
    pub fn run_on<S, C>(&self, target: &S, method: &str, arguments: &[&dyn Renderable], call: C)
    where
        S: ?Sized,
        C: FnOnce(),
    {
        self.run(std::any::type_name_of_val(target), method, arguments, call);
    }

    fn observe(
        &self,
        target: &str,
        method_name: &str,
        arguments: &[&dyn Renderable],
        result: Option<&dyn Renderable>,
    ) {
        let Some(type_spec) = self.registry.get_type(target) else {
            return;
        };

        let undeclared;
        let method = match type_spec.get_method(method_name) {
            Some(method) => method,
            None => {
                undeclared = MethodSpec::new(method_name);
                &undeclared
            }
        };

        let event = CallEvent {
            target,
            method,
            type_directive: type_spec.directive(),
            arguments,
            result,
        };

        if let Err(error) = self.dispatcher.handle(&event) {
            tracing::error!(
                target: TARGET,
                %error,
                "Failed to log call to `{target}::{method_name}`"
            );
        }
    }
}
