//! Type references for fields and methods.

use serde::{Deserialize, Serialize};

/// Scalar types of the service description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Double => "double",
            PrimitiveType::Float => "float",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::Uint32 => "uint32",
            PrimitiveType::Uint64 => "uint64",
            PrimitiveType::Sint32 => "sint32",
            PrimitiveType::Sint64 => "sint64",
            PrimitiveType::Fixed32 => "fixed32",
            PrimitiveType::Fixed64 => "fixed64",
            PrimitiveType::Sfixed32 => "sfixed32",
            PrimitiveType::Sfixed64 => "sfixed64",
            PrimitiveType::Bool => "bool",
            PrimitiveType::String => "string",
            PrimitiveType::Bytes => "bytes",
        }
    }

    /// Parse a scalar type keyword (`int32`, `string`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "double" => PrimitiveType::Double,
            "float" => PrimitiveType::Float,
            "int32" => PrimitiveType::Int32,
            "int64" => PrimitiveType::Int64,
            "uint32" => PrimitiveType::Uint32,
            "uint64" => PrimitiveType::Uint64,
            "sint32" => PrimitiveType::Sint32,
            "sint64" => PrimitiveType::Sint64,
            "fixed32" => PrimitiveType::Fixed32,
            "fixed64" => PrimitiveType::Fixed64,
            "sfixed32" => PrimitiveType::Sfixed32,
            "sfixed64" => PrimitiveType::Sfixed64,
            "bool" => PrimitiveType::Bool,
            "string" => PrimitiveType::String,
            "bytes" => PrimitiveType::Bytes,
            _ => return None,
        })
    }

    pub fn is_integer(&self) -> bool {
        !matches!(
            self,
            PrimitiveType::Double
                | PrimitiveType::Float
                | PrimitiveType::Bool
                | PrimitiveType::String
                | PrimitiveType::Bytes
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, PrimitiveType::Double | PrimitiveType::Float)
    }
}

/// What a type reference points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Primitive { primitive: PrimitiveType },
    /// Message type, by fully-qualified name.
    Message { name: String },
    /// Enum type, by fully-qualified name.
    Enum { name: String },
    Map { key: Box<TypeRef>, value: Box<TypeRef> },
}

/// A (possibly repeated) reference to a type.
///
/// Maps are never marked `repeated`; the map-ness is carried by [`TypeKind::Map`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(flatten)]
    pub kind: TypeKind,
    #[serde(default)]
    pub repeated: bool,
}

impl TypeRef {
    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self {
            kind: TypeKind::Primitive { primitive },
            repeated: false,
        }
    }

    pub fn message(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Message { name: name.into() },
            repeated: false,
        }
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Enum { name: name.into() },
            repeated: false,
        }
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self {
            kind: TypeKind::Map {
                key: Box::new(key),
                value: Box::new(value),
            },
            repeated: false,
        }
    }

    /// The same type, marked repeated.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// The element type of a repeated reference (identity otherwise).
    pub fn element(&self) -> TypeRef {
        Self {
            kind: self.kind.clone(),
            repeated: false,
        }
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, TypeKind::Map { .. })
    }

    pub fn is_message(&self) -> bool {
        matches!(self.kind, TypeKind::Message { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum { .. })
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive { .. })
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match &self.kind {
            TypeKind::Primitive { primitive } => Some(*primitive),
            _ => None,
        }
    }

    /// Fully-qualified name of a message or enum type.
    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Message { name } | TypeKind::Enum { name } => Some(name),
            _ => None,
        }
    }

    pub fn map_key_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            TypeKind::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn map_value_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            TypeKind::Map { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.repeated {
            write!(f, "repeated ")?;
        }
        match &self.kind {
            TypeKind::Primitive { primitive } => write!(f, "{}", primitive.as_str()),
            TypeKind::Message { name } | TypeKind::Enum { name } => write!(f, "{name}"),
            TypeKind::Map { key, value } => write!(f, "map<{key}, {value}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let t = TypeRef::message("google.example.Book").repeated();
        assert!(t.is_message());
        assert!(t.is_repeated());
        assert!(!t.element().is_repeated());
        assert_eq!(t.type_name(), Some("google.example.Book"));

        let m = TypeRef::map(
            TypeRef::primitive(PrimitiveType::String),
            TypeRef::primitive(PrimitiveType::Int64),
        );
        assert!(m.is_map());
        assert!(!m.is_repeated());
        assert_eq!(m.to_string(), "map<string, int64>");
    }

    #[test]
    fn deserialize_flattened_kind() {
        let t: TypeRef = serde_json::from_str(
            r#"{"kind": "message", "name": "google.example.Shelf", "repeated": true}"#,
        )
        .unwrap();
        assert_eq!(t, TypeRef::message("google.example.Shelf").repeated());

        let p: TypeRef = serde_json::from_str(r#"{"kind": "primitive", "primitive": "string"}"#)
            .unwrap();
        assert_eq!(p.as_primitive(), Some(PrimitiveType::String));
    }
}
