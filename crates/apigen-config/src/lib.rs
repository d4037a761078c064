//! Configuration resolution for API client generation.
//!
//! Turns raw per-interface config records into a validated
//! [`InterfaceConfig`]: named retry policies, resource name patterns, method
//! configs (with paging, streaming and long-running descriptors), IAM resource
//! references and an optional smoke test.
//!
//! # Error channels
//!
//! ```text
//! recoverable  ──> DiagCollector ──> checked once per interface ──> Ok(None)
//! fatal        ──> Err(ResolveError), interface aborted, nothing recorded
//! ```
//!
//! Recoverable problems (unknown status codes, malformed retry params, missing
//! methods, dangling retry names) are accumulated so one pass reports all of
//! them. Missing reroute targets and IAM references are fatal.
//!
//! # Example
//!
//! ```ignore
//! use apigen_config::{ConfigProto, resolve_api};
//!
//! let config = ConfigProto::load(Path::new("library.yaml"))?;
//! let run = resolve_api(&model, &config);
//! for (iface, diag) in run.diagnostics() {
//!     eprintln!("{iface}: {diag}");
//! }
//! ```

pub mod api;
pub mod collection;
pub mod diagnostic;
pub mod error;
pub mod iam;
pub mod interface;
pub mod method;
pub mod path_template;
pub mod retry;
pub mod schema;
pub mod smoke_test;
pub mod status;

pub use api::{ApiResolution, InterfaceOutcome, InterfaceReport, resolve_api};
pub use collection::{CollectionConfig, create_collection_configs};
pub use diagnostic::{DiagCollector, Diagnostic, Location, Resolved, Severity};
pub use error::{LoadError, ResolveError};
pub use iam::{IamResource, create_iam_resources};
pub use interface::{
    InterfaceConfig, create_interface_config, get_target_interface, resolve_interface,
};
pub use method::{
    FieldNamePattern, FlatteningConfig, GrpcStreamingConfig, GrpcStreamingType, KnownNames,
    LongRunningConfig, MethodConfig, PageStreamingConfig, create_method_config,
    create_method_config_map, create_method_configs,
};
pub use path_template::{PathTemplate, PathTemplateError};
pub use retry::{
    RetryCodesDefinition, RetrySettings, RetrySettingsDefinition, create_retry_codes_definition,
    create_retry_settings_definition,
};
pub use schema::{ConfigProto, InterfaceConfigProto, MethodConfigProto};
pub use smoke_test::{SmokeTestConfig, create_smoke_test_config};
pub use status::StatusCode;
