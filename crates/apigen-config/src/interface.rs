//! Interface config assembly: the all-or-nothing aggregate for one service.

use crate::collection::{CollectionConfig, create_collection_configs};
use crate::diagnostic::{DiagCollector, Resolved};
use crate::error::ResolveError;
use crate::iam::{IamResource, create_iam_resources};
use crate::method::{KnownNames, MethodConfig, create_method_config_map, create_method_configs};
use crate::retry::{
    RetryCodesDefinition, RetrySettings, RetrySettingsDefinition, create_retry_codes_definition,
    create_retry_settings_definition,
};
use crate::schema::InterfaceConfigProto;
use crate::smoke_test::{SmokeTestConfig, create_smoke_test_config};
use crate::status::StatusCode;
use apigen_model::{Interface, Method, Model};
use indexmap::IndexMap;
use std::collections::BTreeSet;

pub use crate::method::get_target_interface;

/// Fully validated configuration for one interface.
///
/// Only built when the whole resolution pass recorded no errors, and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceConfig {
    interface: Interface,
    method_configs: Vec<MethodConfig>,
    method_config_map: IndexMap<String, MethodConfig>,
    collection_configs: IndexMap<String, CollectionConfig>,
    retry_codes_definition: RetryCodesDefinition,
    retry_settings_definition: RetrySettingsDefinition,
    iam_resources: Vec<IamResource>,
    smoke_test_config: Option<SmokeTestConfig>,
}

impl InterfaceConfig {
    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    pub fn interface_name(&self) -> &str {
        &self.interface.full_name
    }

    pub fn simple_name(&self) -> &str {
        self.interface.simple_name()
    }

    /// Method configs in declaration order.
    pub fn method_configs(&self) -> &[MethodConfig] {
        &self.method_configs
    }

    /// Config for a method of the model. A configured interface is expected to
    /// cover every method handed to it, so absence is fatal.
    pub fn method_config(&self, method: &Method) -> Result<&MethodConfig, ResolveError> {
        self.method_config_map
            .get(&method.simple_name)
            .ok_or_else(|| ResolveError::MissingMethodConfig(method.full_name.clone()))
    }

    pub fn method_config_by_name(&self, simple_name: &str) -> Option<&MethodConfig> {
        self.method_config_map.get(simple_name)
    }

    pub fn collection_config(&self, entity_name: &str) -> Option<&CollectionConfig> {
        self.collection_configs.get(entity_name)
    }

    pub fn collection_configs(&self) -> impl Iterator<Item = &CollectionConfig> {
        self.collection_configs.values()
    }

    pub fn retry_codes_definition(&self) -> &RetryCodesDefinition {
        &self.retry_codes_definition
    }

    pub fn retry_settings_definition(&self) -> &RetrySettingsDefinition {
        &self.retry_settings_definition
    }

    /// Retry code set chosen by a method config.
    pub fn retry_codes_for(&self, method_config: &MethodConfig) -> Option<&BTreeSet<StatusCode>> {
        self.retry_codes_definition
            .get(method_config.retry_codes_name())
    }

    /// Retry settings chosen by a method config.
    pub fn retry_settings_for(&self, method_config: &MethodConfig) -> Option<&RetrySettings> {
        self.retry_settings_definition
            .get(method_config.retry_settings_name())
    }

    pub fn iam_resources(&self) -> &[IamResource] {
        &self.iam_resources
    }

    pub fn smoke_test_config(&self) -> Option<&SmokeTestConfig> {
        self.smoke_test_config.as_ref()
    }

    pub fn has_smoke_test(&self) -> bool {
        self.smoke_test_config.is_some()
    }
}

/// Run every sub-resolver for `iface`, then gate on the collector once.
///
/// Recoverable problems land in `diags` and yield `Ok(None)`. Reroute and IAM
/// lookup failures return `Err` immediately; diagnostics recorded before the
/// abort stay in `diags`.
pub fn create_interface_config(
    diags: &mut DiagCollector,
    model: &Model,
    proto: &InterfaceConfigProto,
    iface: &Interface,
) -> Result<Option<InterfaceConfig>, ResolveError> {
    let retry_codes_definition = create_retry_codes_definition(diags, proto);
    let retry_settings_definition = create_retry_settings_definition(diags, proto);
    let collection_configs = create_collection_configs(diags, proto);

    let known = KnownNames {
        retry_codes: retry_codes_definition.keys().map(String::as_str).collect(),
        retry_params: retry_settings_definition.keys().map(String::as_str).collect(),
        collections: collection_configs.keys().map(String::as_str).collect(),
    };
    let method_config_map = create_method_config_map(diags, model, iface, proto, &known)?;
    let method_configs = create_method_configs(&method_config_map, proto);

    let smoke_test_config = proto
        .smoke_test
        .as_ref()
        .and_then(|smoke| create_smoke_test_config(diags, iface, smoke));

    let iam_resources = create_iam_resources(model, &proto.experimental_features.iam_resources)?;

    if diags.has_errors() {
        tracing::debug!(
            interface = %iface.full_name,
            errors = diags.error_count(),
            "interface config not built"
        );
        return Ok(None);
    }

    Ok(Some(InterfaceConfig {
        interface: iface.clone(),
        method_configs,
        method_config_map,
        collection_configs,
        retry_codes_definition,
        retry_settings_definition,
        iam_resources,
        smoke_test_config,
    }))
}

/// Resolve one interface config with a fresh collector.
///
/// An interface missing from the model is reported as a diagnostic.
pub fn resolve_interface(
    model: &Model,
    proto: &InterfaceConfigProto,
) -> Result<Resolved<InterfaceConfig>, ResolveError> {
    let mut diags = DiagCollector::new();
    let value = resolve_into(&mut diags, model, proto)?;
    Ok(Resolved {
        value,
        diagnostics: diags.into_diagnostics(),
    })
}

/// Look the interface up and assemble it into a caller-owned collector, so
/// diagnostics recorded before a fatal error stay available.
pub(crate) fn resolve_into(
    diags: &mut DiagCollector,
    model: &Model,
    proto: &InterfaceConfigProto,
) -> Result<Option<InterfaceConfig>, ResolveError> {
    match model.lookup_interface(&proto.name) {
        Some(iface) => create_interface_config(diags, model, proto, iface),
        None => {
            diags.error(format!("interface not found: {}", proto.name));
            Ok(None)
        }
    }
}
