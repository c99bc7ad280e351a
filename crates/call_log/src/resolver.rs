//! Combines the directives attached to a method and its type into the single directive a call
//! is logged with.

use tracing::Level;

use crate::registry::{MethodOverride, MethodSpec, TypeDirective};

/// The directive a single call is logged with.
///
/// Only produced for calls that should be logged; see [`resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveDirective<'a> {
    /// The level the call is logged at.
    pub level: Level,

    /// Whether the returned value is included in the log line.
    pub include_result: bool,

    method: &'a MethodSpec,
}

impl EffectiveDirective<'_> {
    /// Whether the value of the parameter at `index` may appear in the log line.
    pub fn parameter_included(&self, index: usize) -> bool {
        !self.method.is_parameter_excluded(index)
    }
}

/// Resolves the directive for a call to `method`, whose type carries `type_directive`.
///
/// A [`MethodDirective`][crate::MethodDirective] on the method takes precedence, and the type
/// directive is not consulted at all. Otherwise the type directive decides, with the method's
/// [`MethodOverride`] flipping its default. Returns `None` if the call should not be logged.
pub fn resolve<'a>(
    method: &'a MethodSpec,
    type_directive: Option<&TypeDirective>,
) -> Option<EffectiveDirective<'a>> {
    let (level, include_result) = if let Some(directive) = method.directive() {
        (directive.level, directive.include_result)
    } else {
        let type_directive = type_directive?;
        let should_log = if type_directive.exclude_methods_by_default {
            method.has_override(MethodOverride::Include)
        } else {
            !method.has_override(MethodOverride::Exclude)
        };

        if !should_log {
            return None;
        }
        (type_directive.level, true)
    };

    Some(EffectiveDirective {
        level,
        include_result: include_result && method.returns_value(),
        method,
    })
}
