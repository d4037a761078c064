//! Raw configuration records, as written by config authors.
//!
//! Every record uses `#[serde(default)]`: a missing key behaves like an empty
//! value, and validation happens later in the resolvers, not at parse time.
//!
//! Example config.yaml:
//! ```yaml
//! language: ruby
//! language_settings:
//!   ruby:
//!     package_name: Google::Cloud::Library::V1
//! interfaces:
//!   - name: google.example.library.v1.LibraryService
//!     retry_codes_def:
//!       - name: idempotent
//!         retry_codes: [UNAVAILABLE, DEADLINE_EXCEEDED]
//!     methods:
//!       - name: GetBook
//!         retry_codes_name: idempotent
//! ```

use crate::error::LoadError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigProto {
    /// Target language for this run (e.g. "ruby").
    pub language: String,
    /// Per-language settings, keyed by language name.
    pub language_settings: IndexMap<String, LanguageSettingsProto>,
    pub interfaces: Vec<InterfaceConfigProto>,
}

/// Settings that only apply to one target language.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LanguageSettingsProto {
    pub package_name: String,
}

/// Configuration for a single interface.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InterfaceConfigProto {
    /// Fully-qualified name of the configured interface.
    pub name: String,
    pub retry_codes_def: Vec<RetryCodesDefinitionProto>,
    pub retry_params_def: Vec<RetryParamsDefinitionProto>,
    pub collections: Vec<CollectionConfigProto>,
    pub methods: Vec<MethodConfigProto>,
    pub smoke_test: Option<SmokeTestConfigProto>,
    pub experimental_features: ExperimentalFeaturesProto,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryCodesDefinitionProto {
    pub name: String,
    pub retry_codes: Vec<String>,
}

/// Retry timing parameters. Durations are milliseconds.
///
/// Fields are optional so a missing value can be told apart from zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryParamsDefinitionProto {
    pub name: String,
    pub initial_retry_delay_millis: Option<i64>,
    pub retry_delay_multiplier: Option<f64>,
    pub max_retry_delay_millis: Option<i64>,
    pub initial_rpc_timeout_millis: Option<i64>,
    pub rpc_timeout_multiplier: Option<f64>,
    pub max_rpc_timeout_millis: Option<i64>,
    pub total_timeout_millis: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectionConfigProto {
    pub entity_name: String,
    pub name_pattern: String,
}

/// Configuration for one method. Order in the interface is significant.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MethodConfigProto {
    /// Simple name of the method.
    pub name: String,
    /// Resolve the method against this interface instead of the configured one.
    pub reroute_to_grpc_interface: String,
    pub retry_codes_name: String,
    pub retry_params_name: String,
    pub timeout_millis: Option<i64>,
    pub page_streaming: Option<PageStreamingConfigProto>,
    pub grpc_streaming: Option<GrpcStreamingConfigProto>,
    pub long_running: Option<LongRunningConfigProto>,
    pub flattening: Option<FlatteningConfigProto>,
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
    /// Request field name -> collection entity name.
    pub field_name_patterns: IndexMap<String, String>,
    pub request_object_method: bool,
    pub sample_code_init_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageStreamingConfigProto {
    pub request: PageStreamingRequestProto,
    pub response: PageStreamingResponseProto,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageStreamingRequestProto {
    pub token_field: String,
    pub page_size_field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageStreamingResponseProto {
    pub token_field: String,
    pub resources_field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GrpcStreamingConfigProto {
    pub resources_field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LongRunningConfigProto {
    pub return_type: String,
    pub metadata_type: String,
    pub implements_delete: bool,
    pub implements_cancel: bool,
    pub initial_poll_delay_millis: i64,
    pub poll_delay_multiplier: f64,
    pub max_poll_delay_millis: i64,
    pub total_poll_timeout_millis: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlatteningConfigProto {
    pub groups: Vec<FlatteningGroupProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlatteningGroupProto {
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SmokeTestConfigProto {
    pub method: String,
    /// `field=value` assignments for the sample request.
    pub init_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExperimentalFeaturesProto {
    pub iam_resources: Vec<IamResourceProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IamResourceProto {
    /// Fully-qualified message type name.
    #[serde(rename = "type")]
    pub type_name: String,
    pub field: String,
}

impl ConfigProto {
    pub fn from_yaml_str(text: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a config file, picking the parser from the extension.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceConfigProto> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Package name configured for `language`, if any.
    pub fn package_name(&self, language: &str) -> Option<&str> {
        self.language_settings
            .get(language)
            .map(|s| s.package_name.as_str())
            .filter(|s| !s.is_empty())
    }
}
