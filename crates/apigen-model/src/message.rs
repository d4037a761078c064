//! Message types and their fields.

use crate::TypeRef;
use serde::{Deserialize, Serialize};

/// A field declared on a message type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }

    pub fn is_repeated(&self) -> bool {
        self.type_ref.is_repeated()
    }

    pub fn is_map(&self) -> bool {
        self.type_ref.is_map()
    }

    pub fn is_message(&self) -> bool {
        self.type_ref.is_message()
    }
}

/// A message type with its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageType {
    pub full_name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl MessageType {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field addition.
    pub fn with_field(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.fields.push(Field::new(name, type_ref));
        self
    }

    /// Last dotted segment of the full name.
    pub fn simple_name(&self) -> &str {
        crate::simple_name(&self.full_name)
    }

    pub fn lookup_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// An enum type. Only its name matters to the config core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub full_name: String,
    #[serde(default)]
    pub values: Vec<String>,
}
