//! Smoke test config: a canary method plus sample request field values.

use crate::diagnostic::DiagCollector;
use crate::schema::SmokeTestConfigProto;
use apigen_model::{Interface, Method};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SmokeTestConfig {
    method: Method,
    /// Field path -> sample value, in declaration order.
    init_fields: IndexMap<String, String>,
}

impl SmokeTestConfig {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn init_fields(&self) -> &IndexMap<String, String> {
        &self.init_fields
    }
}

/// Resolve the smoke test block; reports and returns `None` on failure.
pub fn create_smoke_test_config(
    diags: &mut DiagCollector,
    iface: &Interface,
    proto: &SmokeTestConfigProto,
) -> Option<SmokeTestConfig> {
    let Some(method) = iface.lookup_method(&proto.method) else {
        diags.error_in(&iface.full_name, format!(
            "The configured smoke test method does not exist: {} (in interface {})",
            proto.method, iface.full_name
        ));
        return None;
    };

    let mut init_fields = IndexMap::new();
    let mut ok = true;
    for entry in &proto.init_fields {
        match entry.split_once('=') {
            Some((path, value)) if !path.trim().is_empty() => {
                init_fields.insert(path.trim().to_string(), value.trim().to_string());
            }
            _ => {
                diags.error_in(&iface.full_name, format!(
                    "invalid smoke test init field '{}', expected name=value (in method {})",
                    entry, method.full_name
                ));
                ok = false;
            }
        }
    }

    ok.then(|| SmokeTestConfig {
        method: method.clone(),
        init_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface() -> Interface {
        Interface::new("google.example.v1.Library").with_method(
            "CreateShelf",
            "google.example.v1.CreateShelfRequest",
            "google.example.v1.Shelf",
        )
    }

    #[test]
    fn parses_init_fields() {
        let proto = SmokeTestConfigProto {
            method: "CreateShelf".into(),
            init_fields: vec!["shelf.theme=\"Fiction\"".into(), "parent = $RANDOM".into()],
        };
        let mut diags = DiagCollector::new();
        let config = create_smoke_test_config(&mut diags, &iface(), &proto).unwrap();
        assert!(!diags.has_errors());
        assert_eq!(config.method().simple_name, "CreateShelf");
        assert_eq!(config.init_fields()["shelf.theme"], "\"Fiction\"");
        assert_eq!(config.init_fields()["parent"], "$RANDOM");
    }

    #[test]
    fn rejects_unknown_method_and_bad_fields() {
        let mut diags = DiagCollector::new();
        let proto = SmokeTestConfigProto {
            method: "DeleteShelf".into(),
            init_fields: vec![],
        };
        assert!(create_smoke_test_config(&mut diags, &iface(), &proto).is_none());

        let proto = SmokeTestConfigProto {
            method: "CreateShelf".into(),
            init_fields: vec!["=value".into(), "noequals".into()],
        };
        assert!(create_smoke_test_config(&mut diags, &iface(), &proto).is_none());
        assert_eq!(diags.error_count(), 3);
    }
}
