//! Rendering of argument and result values into text.

use std::fmt;

use serde_json::ser::{CompactFormatter, Formatter};

/// A value that can appear in a call log line, as an argument or as a result.
///
/// Implemented for every type that is both [`serde::Serialize`] and [`fmt::Debug`]: the
/// structured encoding is preferred, the [`fmt::Debug`] form is used when encoding fails.
pub trait Renderable: erased_serde::Serialize + fmt::Debug {}

impl<T> Renderable for T where T: serde::Serialize + fmt::Debug {}

erased_serde::serialize_trait_object!(Renderable);

/// Turns [`Renderable`] values into text.
pub trait ValueRenderer {
    /// The error reported when a value cannot be encoded.
    type Error: fmt::Display;

    /// Encodes `value` into its structured text form.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be encoded.
    fn encode(&self, value: &dyn Renderable) -> Result<String, Self::Error>;

    /// Renders `value`, falling back to its [`fmt::Debug`] form if it cannot be encoded.
    fn render(&self, value: &dyn Renderable) -> String {
        self.encode(value).unwrap_or_else(|error| {
            tracing::trace!(
                target: crate::TARGET,
                %error,
                "Failed to encode value, falling back to its debug representation"
            );
            format!("{value:?}")
        })
    }
}

/// A [`ValueRenderer`] encoding values as JSON.
///
/// The [`serde_json::ser::Formatter`] controls the JSON output style, compact by default.
#[derive(Clone, Debug)]
pub struct JsonRenderer<F = CompactFormatter>
where
    F: Formatter + Clone,
{
    formatter: F,
}

impl<F> JsonRenderer<F>
where
    F: Formatter + Clone,
{
    /// Creates a new [`JsonRenderer`] with the specified formatter.
    pub fn new(formatter: F) -> Self {
        Self { formatter }
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new(CompactFormatter)
    }
}

impl<F> ValueRenderer for JsonRenderer<F>
where
    F: Formatter + Clone,
{
    type Error = serde_json::Error;

    fn encode(&self, value: &dyn Renderable) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, self.formatter.clone());
        serde::Serialize::serialize(value, &mut serializer)?;

        String::from_utf8(buffer).map_err(<serde_json::Error as serde::ser::Error>::custom)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use serde::{Serialize, Serializer};

    use super::*;

    /// A value whose structured encoding always fails.
    #[derive(Debug)]
    pub(crate) struct Unencodable {
        pub(crate) id: u32,
    }

    impl Serialize for Unencodable {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Err(serde::ser::Error::custom("cyclic reference"))
        }
    }

    #[derive(Debug, Serialize)]
    struct User {
        name: &'static str,
        age: u8,
    }

    #[test]
    fn values_are_encoded_as_compact_json() {
        let renderer: JsonRenderer = JsonRenderer::default();

        assert_eq!(renderer.render(&7), "7");
        assert_eq!(renderer.render(&"seven"), r#""seven""#);
        assert_eq!(renderer.render(&None::<u8>), "null");
        assert_eq!(renderer.render(&vec![1, 2]), "[1,2]");
        assert_eq!(
            renderer.render(&User {
                name: "ada",
                age: 36,
            }),
            r#"{"name":"ada","age":36}"#
        );
    }

    #[test]
    fn formatter_controls_the_output_style() {
        let renderer = JsonRenderer::new(serde_json::ser::PrettyFormatter::new());
        let value = BTreeMap::from([("a", 1)]);

        assert_eq!(renderer.render(&value), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn encoding_failure_falls_back_to_debug() {
        let renderer: JsonRenderer = JsonRenderer::default();
        let value = Unencodable { id: 9 };

        assert!(renderer.encode(&value).is_err());
        assert_eq!(renderer.render(&value), "Unencodable { id: 9 }");
    }

    #[test]
    fn non_string_map_keys_fall_back_to_debug() {
        let renderer: JsonRenderer = JsonRenderer::default();
        let value = BTreeMap::from([((1, 2), "point")]);

        assert_eq!(renderer.render(&value), r#"{(1, 2): "point"}"#);
    }
}
