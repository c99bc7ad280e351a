//! Builds the text of call log lines.

use crate::{dispatcher::CallEvent, render::ValueRenderer, resolver::EffectiveDirective};

const ARGUMENT_SEPARATOR: &str = ", ";

/// Formats the log line for `event`, rendering values with `renderer`.
///
/// Parameters excluded by `directive` are left out of the argument list entirely.
///
/// Examples: "add(a=3, b=4)", "add(a=3, b=4): 7"
pub fn format_message<R>(
    directive: &EffectiveDirective<'_>,
    event: &CallEvent<'_>,
    renderer: &R,
) -> String
where
    R: ValueRenderer + ?Sized,
{
    let arguments = event
        .arguments
        .iter()
        .enumerate()
        .filter(|(index, _)| directive.parameter_included(*index))
        .map(|(index, value)| {
            format!(
                "{}={}",
                event.method.parameter_name(index),
                renderer.render(*value)
            )
        })
        .collect::<Vec<_>>()
        .join(ARGUMENT_SEPARATOR);

    let method = event.method.name();
    match event.result.filter(|_| directive.include_result) {
        Some(result) => format!("{method}({arguments}): {}", renderer.render(result)),
        None => format!("{method}({arguments})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Level, MethodDirective, MethodSpec, Renderable, TypeDirective, call_args,
        render::{JsonRenderer, tests::Unencodable},
        resolver::resolve,
    };

    fn add(include_result: bool) -> MethodSpec {
        MethodSpec::new("add")
            .param("a")
            .param("b")
            .with_directive(MethodDirective {
                include_result,
                level: Level::INFO,
            })
    }

    fn event<'a>(
        method: &'a MethodSpec,
        arguments: &'a [&'a dyn Renderable],
        result: Option<&'a dyn Renderable>,
    ) -> CallEvent<'a> {
        CallEvent {
            target: "Calculator",
            method,
            type_directive: None,
            arguments,
            result,
        }
    }

    fn format(event: &CallEvent<'_>) -> String {
        let renderer: JsonRenderer = JsonRenderer::default();
        let directive = resolve(event.method, event.type_directive).expect("call is logged");
        format_message(&directive, event, &renderer)
    }

    #[test]
    fn with_result() {
        let method = add(true);
        let arguments = call_args![3, 4];
        let event = event(&method, &arguments, Some(&7));

        assert_eq!(format(&event), "add(a=3, b=4): 7");
    }

    #[test]
    fn without_result() {
        let method = add(false);
        let arguments = call_args![3, 4];
        let event = event(&method, &arguments, Some(&7));

        assert_eq!(format(&event), "add(a=3, b=4)");
    }

    #[test]
    fn missing_result_is_formatted_without_result() {
        let method = add(true);
        let arguments = call_args![3, 4];
        let event = event(&method, &arguments, None);

        assert_eq!(format(&event), "add(a=3, b=4)");
    }

    #[test]
    fn no_arguments() {
        let method = MethodSpec::new("now").with_directive(MethodDirective::default());
        let event = event(&method, &[], Some(&"noon"));

        assert_eq!(format(&event), r#"now(): "noon""#);
    }

    #[test]
    fn excluded_parameters_are_omitted() {
        let method = MethodSpec::new("login")
            .param("user")
            .excluded_param("password")
            .param("remember")
            .returns_unit();
        let directive = TypeDirective::default();
        let arguments = call_args!["ada", "hunter2", true];
        let event = CallEvent {
            type_directive: Some(&directive),
            ..event(&method, &arguments, None)
        };

        let message = format(&event);
        assert_eq!(message, r#"login(user="ada", remember=true)"#);
        assert!(!message.contains("hunter2"));
    }

    #[test]
    fn undeclared_parameters_use_positional_names() {
        let method = MethodSpec::new("add").param("a");
        let directive = TypeDirective::default();
        let arguments = call_args![3, 4];
        let event = CallEvent {
            type_directive: Some(&directive),
            ..event(&method, &arguments, Some(&7))
        };

        assert_eq!(format(&event), "add(a=3, arg1=4): 7");
    }

    #[test]
    fn unencodable_values_use_their_debug_form() {
        let method = add(true);
        let argument = Unencodable { id: 1 };
        let result = Unencodable { id: 2 };
        let arguments = call_args![argument, 4];
        let event = event(&method, &arguments, Some(&result));

        assert_eq!(
            format(&event),
            "add(a=Unencodable { id: 1 }, b=4): Unencodable { id: 2 }"
        );
    }

    #[test]
    fn formatting_is_idempotent() {
        let method = add(true);
        let names = vec!["x", "y"];
        let arguments = call_args![3, names];
        let event = event(&method, &arguments, Some(&7));

        assert_eq!(format(&event), format(&event));
        assert_eq!(format(&event), r#"add(a=3, b=["x","y"]): 7"#);
    }
}
