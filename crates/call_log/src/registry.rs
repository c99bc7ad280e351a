//! Declarative logging directives for types and their methods.
//!
//! Directives are attached to a [`TypeSpec`] and its [`MethodSpec`]s once, when the type is
//! registered in a [`DirectiveRegistry`], and reused for every call made on that type.

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use tracing::Level;

/// A method-level directive, opting a single method into call logging.
///
/// A method carrying this directive is logged regardless of any [`TypeDirective`] on its type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodDirective {
    /// Whether the returned value is included in the log line.
    pub include_result: bool,

    /// The level calls to the method are logged at.
    pub level: Level,
}

impl Default for MethodDirective {
    fn default() -> Self {
        Self {
            include_result: true,
            level: Level::DEBUG,
        }
    }
}

/// A type-level directive, establishing the default policy for every method of a type that
/// has no [`MethodDirective`] of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeDirective {
    /// If `true`, only methods marked with [`MethodOverride::Include`] are logged.
    /// If `false`, all methods are logged except those marked with [`MethodOverride::Exclude`].
    pub exclude_methods_by_default: bool,

    /// The level calls to the methods of the type are logged at.
    pub level: Level,
}

impl Default for TypeDirective {
    fn default() -> Self {
        Self {
            exclude_methods_by_default: false,
            level: Level::DEBUG,
        }
    }
}

/// Flips the [`TypeDirective`] default for a single method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodOverride {
    /// Log the method even though its type excludes methods by default.
    Include,

    /// Do not log the method even though its type includes methods by default.
    Exclude,
}

/// A declared method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterSpec {
    name: String,
    excluded: bool,
}

impl ParameterSpec {
    /// The declared name of the parameter.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the value of the parameter is kept out of log lines.
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }
}

/// Everything known about a method ahead of any call to it: its parameters, whether it
/// returns a value, and the directives attached to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSpec {
    name: String,
    parameters: Vec<ParameterSpec>,
    returns_value: bool,
    directive: Option<MethodDirective>,
    include_override: bool,
    exclude_override: bool,
}

impl MethodSpec {
    /// Describes a method named `name`, with no declared parameters, returning a value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            returns_value: true,
            directive: None,
            include_override: false,
            exclude_override: false,
        }
    }

    /// Declares the next parameter of the method.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(ParameterSpec {
            name: name.into(),
            excluded: false,
        });
        self
    }

    /// Declares the next parameter of the method, whose value must never be logged.
    #[must_use]
    pub fn excluded_param(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(ParameterSpec {
            name: name.into(),
            excluded: true,
        });
        self
    }

    /// Declares that the method returns nothing, so no result is ever logged for it.
    #[must_use]
    pub fn returns_unit(mut self) -> Self {
        self.returns_value = false;
        self
    }

    /// Attaches a [`MethodDirective`] to the method.
    #[must_use]
    pub fn with_directive(mut self, directive: MethodDirective) -> Self {
        self.directive = Some(directive);
        self
    }

    /// Marks the method with `method_override`.
    ///
    /// Both markers may be present on the same method; each one only matters under the type
    /// policy it flips.
    #[must_use]
    pub fn with_override(mut self, method_override: MethodOverride) -> Self {
        match method_override {
            MethodOverride::Include => self.include_override = true,
            MethodOverride::Exclude => self.exclude_override = true,
        }
        self
    }

    /// Marks the method with [`MethodOverride::Include`].
    #[must_use]
    pub fn include(self) -> Self {
        self.with_override(MethodOverride::Include)
    }

    /// Marks the method with [`MethodOverride::Exclude`].
    #[must_use]
    pub fn exclude(self) -> Self {
        self.with_override(MethodOverride::Exclude)
    }

    /// The name of the method.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameters of the method, in call order.
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Whether the method returns a value.
    pub fn returns_value(&self) -> bool {
        self.returns_value
    }

    /// The method-level directive, if any.
    pub fn directive(&self) -> Option<&MethodDirective> {
        self.directive.as_ref()
    }

    /// Whether the method carries the `method_override` marker.
    pub fn has_override(&self, method_override: MethodOverride) -> bool {
        match method_override {
            MethodOverride::Include => self.include_override,
            MethodOverride::Exclude => self.exclude_override,
        }
    }

    /// The name of the parameter at `index`.
    ///
    /// Falls back to a positional name (`arg0`, `arg1`, ...) for parameters that were not
    /// declared.
    pub fn parameter_name(&self, index: usize) -> Cow<'_, str> {
        match self.parameters.get(index) {
            Some(parameter) => Cow::Borrowed(parameter.name()),
            None => Cow::Owned(format!("arg{index}")),
        }
    }

    /// Whether the parameter at `index` is excluded from log lines.
    pub fn is_parameter_excluded(&self, index: usize) -> bool {
        self.parameters
            .get(index)
            .is_some_and(ParameterSpec::is_excluded)
    }
}

/// A loggable type: its optional [`TypeDirective`] and the methods declared on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSpec {
    name: String,
    directive: Option<TypeDirective>,
    methods: FxHashMap<String, MethodSpec>,
}

impl TypeSpec {
    /// Describes a type named `name` with no directive and no methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directive: None,
            methods: FxHashMap::default(),
        }
    }

    /// Describes the type `S`, named after [`std::any::type_name`].
    ///
    /// Calls wrapped with [`CallInterceptor::invoke_on`][crate::CallInterceptor::invoke_on] and
    /// its siblings are looked up under this name.
    pub fn of<S>() -> Self
    where
        S: ?Sized,
    {
        Self::new(std::any::type_name::<S>())
    }

    /// Attaches a [`TypeDirective`] to the type.
    #[must_use]
    pub fn with_directive(mut self, directive: TypeDirective) -> Self {
        self.directive = Some(directive);
        self
    }

    /// Declares a method of the type, replacing any method previously declared with the same
    /// name.
    #[must_use]
    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.insert(method.name.clone(), method);
        self
    }

    /// The name of the type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type-level directive, if any.
    pub fn directive(&self) -> Option<&TypeDirective> {
        self.directive.as_ref()
    }

    /// Looks up a declared method by name.
    pub fn get_method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.get(name)
    }
}

/// All registered [`TypeSpec`]s, keyed by type name.
#[derive(Clone, Debug, Default)]
pub struct DirectiveRegistry {
    types: FxHashMap<String, TypeSpec>,
}

impl DirectiveRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type, replacing any type previously registered with the same name.
    #[must_use]
    pub fn with_type(mut self, type_spec: TypeSpec) -> Self {
        self.register(type_spec);
        self
    }

    /// Registers a type, replacing any type previously registered with the same name.
    pub fn register(&mut self, type_spec: TypeSpec) {
        let name = type_spec.name.clone();
        if self.types.insert(name.clone(), type_spec).is_some() {
            tracing::debug!(
                target: crate::TARGET,
                type_name = %name,
                "Replaced a previously registered type"
            );
        }
    }

    /// Looks up a registered type by name.
    pub fn get_type(&self, name: &str) -> Option<&TypeSpec> {
        self.types.get(name)
    }
}
