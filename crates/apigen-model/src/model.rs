//! The service model and its global symbol tables.

use crate::{EnumType, Interface, MessageType, PrimitiveType, TypeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// On-disk shape of a model: flat lists, indexed on load.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct ModelFile {
    interfaces: Vec<Interface>,
    messages: Vec<MessageType>,
    enums: Vec<EnumType>,
}

/// A service description with by-name lookup tables.
///
/// Read-only to the configuration core: everything here is built before
/// resolution starts and only queried afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "ModelFile", into = "ModelFile")]
pub struct Model {
    interfaces: IndexMap<String, Interface>,
    messages: IndexMap<String, MessageType>,
    enums: IndexMap<String, EnumType>,
}

impl From<ModelFile> for Model {
    fn from(file: ModelFile) -> Self {
        let mut model = Model::new();
        for iface in file.interfaces {
            model.add_interface(iface);
        }
        for message in file.messages {
            model.add_message(message);
        }
        for e in file.enums {
            model.add_enum(e);
        }
        model
    }
}

impl From<Model> for ModelFile {
    fn from(model: Model) -> Self {
        ModelFile {
            interfaces: model.interfaces.into_values().collect(),
            messages: model.messages.into_values().collect(),
            enums: model.enums.into_values().collect(),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_interface(&mut self, iface: Interface) -> &mut Self {
        self.interfaces.insert(iface.full_name.clone(), iface);
        self
    }

    pub fn add_message(&mut self, message: MessageType) -> &mut Self {
        self.messages.insert(message.full_name.clone(), message);
        self
    }

    pub fn add_enum(&mut self, e: EnumType) -> &mut Self {
        self.enums.insert(e.full_name.clone(), e);
        self
    }

    /// Interfaces in insertion order.
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }

    pub fn lookup_interface(&self, full_name: &str) -> Option<&Interface> {
        self.interfaces.get(full_name)
    }

    pub fn lookup_message(&self, full_name: &str) -> Option<&MessageType> {
        self.messages.get(full_name)
    }

    /// Resolve a type name: a declared message or enum, or a scalar keyword.
    pub fn lookup_type(&self, name: &str) -> Option<TypeRef> {
        if self.messages.contains_key(name) {
            return Some(TypeRef::message(name));
        }
        if self.enums.contains_key(name) {
            return Some(TypeRef::enumeration(name));
        }
        PrimitiveType::from_keyword(name).map(TypeRef::primitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Streaming;

    #[test]
    fn lookup_tables() {
        let mut model = Model::new();
        model
            .add_interface(Interface::new("google.example.v1.Library").with_method(
                "GetBook",
                "google.example.v1.GetBookRequest",
                "google.example.v1.Book",
            ))
            .add_message(
                MessageType::new("google.example.v1.Book")
                    .with_field("name", TypeRef::primitive(PrimitiveType::String)),
            );

        assert!(model.lookup_interface("google.example.v1.Library").is_some());
        assert!(model.lookup_interface("Library").is_none());
        assert_eq!(
            model.lookup_type("google.example.v1.Book"),
            Some(TypeRef::message("google.example.v1.Book"))
        );
        assert_eq!(
            model.lookup_type("int32"),
            Some(TypeRef::primitive(PrimitiveType::Int32))
        );
        assert_eq!(model.lookup_type("google.example.v1.Nope"), None);
    }

    #[test]
    fn load_from_json() {
        let model: Model = serde_json::from_str(
            r#"{
                "interfaces": [{
                    "full_name": "google.example.v1.Echo",
                    "methods": [{
                        "simple_name": "Expand",
                        "full_name": "google.example.v1.Echo.Expand",
                        "input_type": "google.example.v1.ExpandRequest",
                        "output_type": "google.example.v1.EchoResponse",
                        "server_streaming": true
                    }]
                }],
                "messages": [{
                    "full_name": "google.example.v1.ExpandRequest",
                    "fields": [{"name": "content", "type": {"kind": "primitive", "primitive": "string"}}]
                }]
            }"#,
        )
        .unwrap();

        let iface = model.lookup_interface("google.example.v1.Echo").unwrap();
        let expand = iface.lookup_method("Expand").unwrap();
        assert_eq!(expand.streaming(), Streaming::Server);
        let request = model.lookup_message(&expand.input_type).unwrap();
        assert!(request.lookup_field("content").is_some());
    }
}
