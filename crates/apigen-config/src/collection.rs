//! Collection configs: named resource name patterns.

use crate::diagnostic::DiagCollector;
use crate::path_template::PathTemplate;
use crate::schema::{CollectionConfigProto, InterfaceConfigProto};
use indexmap::IndexMap;

/// A resource entity and the pattern its names follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    entity_name: String,
    name_template: PathTemplate,
}

impl CollectionConfig {
    /// Validate one collection entry; reports and returns `None` on failure.
    pub fn create(diags: &mut DiagCollector, proto: &CollectionConfigProto) -> Option<Self> {
        if proto.entity_name.is_empty() {
            diags.error(format!(
                "missing entity_name for name pattern '{}'",
                proto.name_pattern
            ));
            return None;
        }
        match PathTemplate::parse(&proto.name_pattern) {
            Ok(name_template) => Some(Self {
                entity_name: proto.entity_name.clone(),
                name_template,
            }),
            Err(e) => {
                diags.error(format!(
                    "invalid name pattern for collection '{}': {}",
                    proto.entity_name, e
                ));
                None
            }
        }
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn name_pattern(&self) -> &str {
        self.name_template.as_str()
    }

    pub fn name_template(&self) -> &PathTemplate {
        &self.name_template
    }
}

/// Resolve every collection of the interface.
///
/// Entries are validated independently. A later entry with the same entity
/// name replaces an earlier one.
pub fn create_collection_configs(
    diags: &mut DiagCollector,
    proto: &InterfaceConfigProto,
) -> IndexMap<String, CollectionConfig> {
    let mut configs = IndexMap::new();
    for collection in &proto.collections {
        let Some(config) = CollectionConfig::create(diags, collection) else {
            tracing::debug!(entity = %collection.entity_name, "skipping invalid collection");
            continue;
        };
        configs.insert(config.entity_name.clone(), config);
    }
    configs
}
