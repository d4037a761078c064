//! Interfaces (services) and their RPC methods.

use serde::{Deserialize, Serialize};

/// Fully-qualified name of the empty message.
pub const EMPTY_TYPE: &str = "google.protobuf.Empty";

/// Fully-qualified name of the long-running operation message.
pub const OPERATION_TYPE: &str = "google.longrunning.Operation";

/// Streaming direction of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Streaming {
    None,
    Client,
    Server,
    Bidi,
}

impl Streaming {
    pub fn as_str(&self) -> &'static str {
        match self {
            Streaming::None => "none",
            Streaming::Client => "client",
            Streaming::Server => "server",
            Streaming::Bidi => "bidi",
        }
    }
}

/// A single RPC operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub simple_name: String,
    /// `package.Interface.Method`
    pub full_name: String,
    /// Fully-qualified input message name.
    pub input_type: String,
    /// Fully-qualified output message name.
    pub output_type: String,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
}

impl Method {
    pub fn streaming(&self) -> Streaming {
        match (self.client_streaming, self.server_streaming) {
            (false, false) => Streaming::None,
            (true, false) => Streaming::Client,
            (false, true) => Streaming::Server,
            (true, true) => Streaming::Bidi,
        }
    }

    pub fn request_streaming(&self) -> bool {
        self.client_streaming
    }

    pub fn response_streaming(&self) -> bool {
        self.server_streaming
    }

    pub fn is_streaming(&self) -> bool {
        self.client_streaming || self.server_streaming
    }

    pub fn is_output_type_empty(&self) -> bool {
        self.output_type == EMPTY_TYPE
    }

    pub fn returns_operation(&self) -> bool {
        self.output_type == OPERATION_TYPE
    }
}

/// A named collection of RPC methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub full_name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Interface {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            methods: Vec::new(),
        }
    }

    /// Builder-style unary method addition.
    pub fn with_method(
        self,
        simple_name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        self.with_streaming_method(simple_name, input_type, output_type, Streaming::None)
    }

    /// Builder-style method addition with an explicit streaming direction.
    pub fn with_streaming_method(
        mut self,
        simple_name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
        streaming: Streaming,
    ) -> Self {
        let simple_name = simple_name.into();
        let full_name = format!("{}.{}", self.full_name, simple_name);
        self.methods.push(Method {
            simple_name,
            full_name,
            input_type: input_type.into(),
            output_type: output_type.into(),
            client_streaming: matches!(streaming, Streaming::Client | Streaming::Bidi),
            server_streaming: matches!(streaming, Streaming::Server | Streaming::Bidi),
        });
        self
    }

    pub fn simple_name(&self) -> &str {
        crate::simple_name(&self.full_name)
    }

    /// Package portion of the full name (everything before the last dot).
    pub fn package(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map(|(pkg, _)| pkg)
            .unwrap_or("")
    }

    pub fn lookup_method(&self, simple_name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.simple_name == simple_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streaming_flags() {
        let iface = Interface::new("google.example.v1.Echo")
            .with_method("Echo", "google.example.v1.EchoRequest", EMPTY_TYPE)
            .with_streaming_method(
                "Chat",
                "google.example.v1.EchoRequest",
                "google.example.v1.EchoResponse",
                Streaming::Bidi,
            );

        let echo = iface.lookup_method("Echo").unwrap();
        assert_eq!(echo.streaming(), Streaming::None);
        assert!(echo.is_output_type_empty());
        assert_eq!(echo.full_name, "google.example.v1.Echo.Echo");

        let chat = iface.lookup_method("Chat").unwrap();
        assert_eq!(chat.streaming(), Streaming::Bidi);
        assert!(chat.request_streaming() && chat.response_streaming());

        assert_eq!(iface.simple_name(), "Echo");
        assert_eq!(iface.package(), "google.example.v1");
        assert!(iface.lookup_method("Missing").is_none());
    }
}
