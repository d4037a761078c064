//! Type spelling per target language.

use crate::name::Name;
use crate::type_name::TypeName;
use apigen_model::{Interface, PrimitiveType, TypeKind, TypeRef};

/// Spells model types in a target language.
pub trait TypeFormatter: Send + Sync {
    /// Name of a message or enum type given its fully-qualified model name.
    fn proto_type_name(&self, full_name: &str) -> TypeName;

    fn primitive_name(&self, primitive: PrimitiveType) -> &'static str;

    /// Container spelling for repeated fields, e.g. `Array` with `%s<%i>`.
    fn repeated_pattern(&self) -> (&'static str, &'static str);

    /// Container spelling for maps, e.g. `Hash` with `%s{%i => %i}`.
    fn map_pattern(&self) -> (&'static str, &'static str);

    /// Literal for a primitive or enum value.
    fn render_primitive_value(&self, type_ref: &TypeRef, value: &str) -> String;

    /// Spelling of a single element, ignoring `repeated`.
    fn element_type_name(&self, type_ref: &TypeRef) -> TypeName {
        match &type_ref.kind {
            TypeKind::Primitive { primitive } => TypeName::new(self.primitive_name(*primitive)),
            TypeKind::Message { name } | TypeKind::Enum { name } => self.proto_type_name(name),
            TypeKind::Map { key, value } => {
                let (container, pattern) = self.map_pattern();
                TypeName::with_pattern(
                    container,
                    container,
                    pattern,
                    vec![self.element_type_name(key), self.element_type_name(value)],
                )
            }
        }
    }

    fn type_name(&self, type_ref: &TypeRef) -> TypeName {
        if type_ref.is_repeated() {
            let (container, pattern) = self.repeated_pattern();
            TypeName::with_pattern(
                container,
                container,
                pattern,
                vec![self.element_type_name(type_ref)],
            )
        } else {
            self.element_type_name(type_ref)
        }
    }

    fn full_name_for(&self, type_ref: &TypeRef) -> String {
        self.type_name(type_ref).full_name()
    }

    fn nickname_for(&self, type_ref: &TypeRef) -> String {
        self.type_name(type_ref).nickname()
    }

    fn full_name_for_element_type(&self, type_ref: &TypeRef) -> String {
        self.element_type_name(type_ref).full_name()
    }

    fn full_name_for_message(&self, full_name: &str) -> String {
        self.proto_type_name(full_name).full_name()
    }

    fn full_name_for_interface(&self, iface: &Interface) -> String {
        self.proto_type_name(&iface.full_name).full_name()
    }
}

fn quoted(value: &str, quote: char) -> String {
    let trimmed = value.trim_matches(|c| c == '"' || c == '\'');
    let escaped = trimmed.replace('\\', "\\\\").replace(quote, &format!("\\{quote}"));
    format!("{quote}{escaped}{quote}")
}

/// Model names as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonTypeFormatter;

impl TypeFormatter for CommonTypeFormatter {
    fn proto_type_name(&self, full_name: &str) -> TypeName {
        TypeName::with_nickname(full_name, apigen_model::simple_name(full_name))
    }

    fn primitive_name(&self, primitive: PrimitiveType) -> &'static str {
        primitive.as_str()
    }

    fn repeated_pattern(&self) -> (&'static str, &'static str) {
        ("repeated", "%s<%i>")
    }

    fn map_pattern(&self) -> (&'static str, &'static str) {
        ("map", "%s<%i, %i>")
    }

    fn render_primitive_value(&self, type_ref: &TypeRef, value: &str) -> String {
        match type_ref.as_primitive() {
            Some(PrimitiveType::String | PrimitiveType::Bytes) => quoted(value, '"'),
            _ => value.to_string(),
        }
    }
}

/// `google.example.v1.Book` -> `Google::Example::V1::Book`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RubyTypeFormatter;

impl TypeFormatter for RubyTypeFormatter {
    fn proto_type_name(&self, full_name: &str) -> TypeName {
        let simple = apigen_model::simple_name(full_name);
        let package = full_name
            .strip_suffix(simple)
            .unwrap_or_default()
            .trim_end_matches('.');
        let mut modules: Vec<String> = package
            .split('.')
            .filter(|p| !p.is_empty())
            .map(|p| Name::from(p).to_upper_camel())
            .collect();
        modules.push(simple.to_string());
        TypeName::with_nickname(modules.join("::"), simple)
    }

    fn primitive_name(&self, primitive: PrimitiveType) -> &'static str {
        match primitive {
            PrimitiveType::Bool => "true, false",
            PrimitiveType::Double | PrimitiveType::Float => "Float",
            PrimitiveType::String | PrimitiveType::Bytes => "String",
            _ => "Integer",
        }
    }

    fn repeated_pattern(&self) -> (&'static str, &'static str) {
        ("Array", "%s<%i>")
    }

    fn map_pattern(&self) -> (&'static str, &'static str) {
        ("Hash", "%s{%i => %i}")
    }

    fn render_primitive_value(&self, type_ref: &TypeRef, value: &str) -> String {
        if type_ref.is_enum() {
            return format!(":{value}");
        }
        match type_ref.as_primitive() {
            Some(PrimitiveType::String | PrimitiveType::Bytes) => quoted(value, '"'),
            Some(PrimitiveType::Bool) => value.to_lowercase(),
            _ => value.to_string(),
        }
    }
}

/// Dotted module paths; builtin scalar names.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonTypeFormatter;

impl TypeFormatter for PythonTypeFormatter {
    fn proto_type_name(&self, full_name: &str) -> TypeName {
        TypeName::with_nickname(full_name, apigen_model::simple_name(full_name))
    }

    fn primitive_name(&self, primitive: PrimitiveType) -> &'static str {
        match primitive {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Double | PrimitiveType::Float => "float",
            PrimitiveType::String => "str",
            PrimitiveType::Bytes => "bytes",
            _ => "int",
        }
    }

    fn repeated_pattern(&self) -> (&'static str, &'static str) {
        ("list", "%s[%i]")
    }

    fn map_pattern(&self) -> (&'static str, &'static str) {
        ("dict", "%s[%i, %i]")
    }

    fn render_primitive_value(&self, type_ref: &TypeRef, value: &str) -> String {
        match type_ref.as_primitive() {
            Some(PrimitiveType::String) => quoted(value, '\''),
            Some(PrimitiveType::Bytes) => format!("b{}", quoted(value, '\'')),
            Some(PrimitiveType::Bool) => match value {
                "true" => "True".to_string(),
                "false" => "False".to_string(),
                other => other.to_string(),
            },
            _ => value.to_string(),
        }
    }
}
