//! Source type to TypeScript type mapping.
//!
//! The mapping is a fixed table over the server runtime's primitive type
//! names, a nullable variant of each, and the event-callback type. Anything
//! else is an object. The function is total: an unknown name is a valid input
//! with a fallback result, not an error.

use std::fmt;

/// Prefix shared by the zero- and one-argument event callback types.
pub const EVENT_CALLBACK_TYPE_NAME: &str = "Microsoft.AspNetCore.Components.EventCallback";

/// The primitive TypeScript types a source primitive can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Number,
    Boolean,
    String,
}

impl Primitive {
    pub fn label(self) -> &'static str {
        match self {
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::String => "string",
        }
    }
}

/// A mapped TypeScript type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// `number`, `boolean` or `string`.
    Primitive(Primitive),
    /// `<primitive> | undefined`.
    Optional(Primitive),
    /// `() => void` without an argument, `(_: T) => void` with one.
    Callback(Option<Box<TargetType>>),
    /// Fallback for every unrecognized type.
    Object,
}

impl TargetType {
    /// Widen a primitive to its `| undefined` form. Other types are returned
    /// unchanged.
    pub fn into_optional(self) -> TargetType {
        match self {
            TargetType::Primitive(p) => TargetType::Optional(p),
            other => other,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Primitive(p) => f.write_str(p.label()),
            TargetType::Optional(p) => write!(f, "{} | undefined", p.label()),
            TargetType::Callback(None) => f.write_str("() => void"),
            TargetType::Callback(Some(arg)) => write!(f, "(_: {}) => void", arg),
            TargetType::Object => f.write_str("object"),
        }
    }
}

/// Map a fully qualified source type name to its TypeScript type.
pub fn map_type(source_type_name: &str) -> TargetType {
    if let Some(mapped) = map_primitive(source_type_name) {
        return mapped;
    }

    if let Some(rest) = source_type_name.strip_prefix(EVENT_CALLBACK_TYPE_NAME) {
        return map_callback(rest);
    }

    TargetType::Object
}

fn map_primitive(source_type_name: &str) -> Option<TargetType> {
    let (base, nullable) = match source_type_name.strip_suffix('?') {
        Some(base) => (base, true),
        None => (source_type_name, false),
    };

    let primitive = match base {
        "System.Byte" | "System.SByte" | "System.Int16" | "System.UInt16" | "System.Int32"
        | "System.UInt32" | "System.Int64" | "System.UInt64" | "System.Single"
        | "System.Double" | "System.Decimal" => Primitive::Number,
        "System.Boolean" => Primitive::Boolean,
        "System.Char" | "System.String" => Primitive::String,
        _ => return None,
    };

    Some(if nullable {
        TargetType::Optional(primitive)
    } else {
        TargetType::Primitive(primitive)
    })
}

/// `rest` is whatever follows the callback prefix, e.g. `""` or
/// `"<System.Int32>"`.
fn map_callback(rest: &str) -> TargetType {
    let inner = rest.trim_start_matches('<').trim_end_matches('>');
    if inner.is_empty() {
        return TargetType::Callback(None);
    }

    let argument = map_primitive(inner).unwrap_or(TargetType::Object);
    TargetType::Callback(Some(Box::new(argument)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NUMBERS: &[&str] = &[
        "System.Byte",
        "System.SByte",
        "System.Int16",
        "System.UInt16",
        "System.Int32",
        "System.UInt32",
        "System.Int64",
        "System.UInt64",
        "System.Single",
        "System.Double",
        "System.Decimal",
    ];

    #[test]
    fn numeric_types_map_to_number() {
        for name in NUMBERS {
            assert_eq!(map_type(name).to_string(), "number", "{name}");
            assert_eq!(
                map_type(&format!("{name}?")).to_string(),
                "number | undefined",
                "{name}?"
            );
        }
    }

    #[test]
    fn boolean_and_string_types() {
        assert_eq!(map_type("System.Boolean").to_string(), "boolean");
        assert_eq!(map_type("System.Boolean?").to_string(), "boolean | undefined");
        assert_eq!(map_type("System.Char").to_string(), "string");
        assert_eq!(map_type("System.Char?").to_string(), "string | undefined");
        assert_eq!(map_type("System.String").to_string(), "string");
        assert_eq!(map_type("System.String?").to_string(), "string | undefined");
    }

    #[test]
    fn unknown_types_fall_back_to_object() {
        assert_eq!(map_type("MyApp.Models.Person"), TargetType::Object);
        assert_eq!(map_type(""), TargetType::Object);
        assert_eq!(map_type("System.Int32??"), TargetType::Object);
        assert_eq!(map_type("int"), TargetType::Object);
    }

    #[test]
    fn zero_argument_callback() {
        let mapped = map_type(EVENT_CALLBACK_TYPE_NAME);
        assert_eq!(mapped, TargetType::Callback(None));
        assert_eq!(mapped.to_string(), "() => void");
    }

    #[test]
    fn single_argument_callback() {
        let name = format!("{EVENT_CALLBACK_TYPE_NAME}<System.Int32>");
        assert_eq!(map_type(&name).to_string(), "(_: number) => void");

        let name = format!("{EVENT_CALLBACK_TYPE_NAME}<System.Boolean?>");
        assert_eq!(map_type(&name).to_string(), "(_: boolean | undefined) => void");

        let name = format!("{EVENT_CALLBACK_TYPE_NAME}<Microsoft.AspNetCore.Components.Web.MouseEventArgs>");
        assert_eq!(map_type(&name).to_string(), "(_: object) => void");
    }

    #[test]
    fn into_optional_only_widens_primitives() {
        assert_eq!(
            TargetType::Primitive(Primitive::String).into_optional(),
            TargetType::Optional(Primitive::String)
        );
        assert_eq!(TargetType::Object.into_optional(), TargetType::Object);
        assert_eq!(
            TargetType::Callback(None).into_optional(),
            TargetType::Callback(None)
        );
    }

    proptest! {
        #[test]
        fn mapping_is_total(name in ".*") {
            let label = map_type(&name).to_string();
            prop_assert!(!label.is_empty());
        }

        #[test]
        fn dotless_names_are_objects(name in "[A-Za-z0-9_]{0,24}") {
            prop_assert_eq!(map_type(&name), TargetType::Object);
        }
    }
}
