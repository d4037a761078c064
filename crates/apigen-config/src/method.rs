//! Method configs: per-method retry choice, paging, streaming and long-running descriptors.

use crate::diagnostic::DiagCollector;
use crate::error::ResolveError;
use crate::schema::{
    GrpcStreamingConfigProto, InterfaceConfigProto, LongRunningConfigProto, MethodConfigProto,
    PageStreamingConfigProto,
};
use apigen_model::{Field, Interface, MessageType, Method, Model, Streaming, TypeRef};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::time::Duration;

/// Names a method config may refer to, collected from sibling registries.
#[derive(Debug, Default, Clone)]
pub struct KnownNames<'a> {
    pub retry_codes: HashSet<&'a str>,
    pub retry_params: HashSet<&'a str>,
    pub collections: HashSet<&'a str>,
}

/// Paging descriptor: which fields carry the page token and the page contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStreamingConfig {
    pub request_token_field: Field,
    pub page_size_field: Option<Field>,
    pub response_token_field: Field,
    pub resources_field: Field,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrpcStreamingType {
    ClientStreaming,
    ServerStreaming,
    BidiStreaming,
}

impl GrpcStreamingType {
    fn from_streaming(streaming: Streaming) -> Option<Self> {
        match streaming {
            Streaming::None => None,
            Streaming::Client => Some(GrpcStreamingType::ClientStreaming),
            Streaming::Server => Some(GrpcStreamingType::ServerStreaming),
            Streaming::Bidi => Some(GrpcStreamingType::BidiStreaming),
        }
    }
}

/// Streaming descriptor, derived from the method's declared direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrpcStreamingConfig {
    pub streaming_type: GrpcStreamingType,
    /// Field of each streamed response holding the resources, if configured.
    pub resources_field: Option<Field>,
}

/// Long-running operation descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRunningConfig {
    pub return_type: TypeRef,
    pub metadata_type: TypeRef,
    pub implements_delete: bool,
    pub implements_cancel: bool,
    pub initial_poll_delay: Duration,
    pub poll_delay_multiplier: f64,
    pub max_poll_delay: Duration,
    pub total_poll_timeout: Duration,
}

/// One flattened call signature: the request fields exposed as parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatteningConfig {
    pub parameters: Vec<Field>,
}

/// A request field whose value is a resource name of the given collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNamePattern {
    pub field: Field,
    pub entity_name: String,
}

/// Resolved configuration for one method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodConfig {
    method: Method,
    /// Interface the method was resolved against, when rerouted.
    rerouted_interface: Option<String>,
    retry_codes_name: String,
    retry_settings_name: String,
    timeout: Option<Duration>,
    page_streaming: Option<PageStreamingConfig>,
    grpc_streaming: Option<GrpcStreamingConfig>,
    long_running: Option<LongRunningConfig>,
    flattening: Vec<FlatteningConfig>,
    required_fields: Vec<Field>,
    optional_fields: Vec<Field>,
    field_name_patterns: Vec<FieldNamePattern>,
    request_object_method: bool,
    sample_code_init_fields: Vec<String>,
}

impl MethodConfig {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn rerouted_interface(&self) -> Option<&str> {
        self.rerouted_interface.as_deref()
    }

    pub fn retry_codes_name(&self) -> &str {
        &self.retry_codes_name
    }

    pub fn retry_settings_name(&self) -> &str {
        &self.retry_settings_name
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn page_streaming(&self) -> Option<&PageStreamingConfig> {
        self.page_streaming.as_ref()
    }

    pub fn is_page_streaming(&self) -> bool {
        self.page_streaming.is_some()
    }

    pub fn grpc_streaming(&self) -> Option<&GrpcStreamingConfig> {
        self.grpc_streaming.as_ref()
    }

    pub fn is_grpc_streaming(&self) -> bool {
        self.grpc_streaming.is_some()
    }

    pub fn grpc_streaming_type(&self) -> Option<GrpcStreamingType> {
        self.grpc_streaming.as_ref().map(|g| g.streaming_type)
    }

    pub fn long_running(&self) -> Option<&LongRunningConfig> {
        self.long_running.as_ref()
    }

    pub fn is_long_running(&self) -> bool {
        self.long_running.is_some()
    }

    pub fn flattening(&self) -> &[FlatteningConfig] {
        &self.flattening
    }

    pub fn is_flattening(&self) -> bool {
        !self.flattening.is_empty()
    }

    pub fn required_fields(&self) -> &[Field] {
        &self.required_fields
    }

    pub fn optional_fields(&self) -> &[Field] {
        &self.optional_fields
    }

    pub fn field_name_patterns(&self) -> &[FieldNamePattern] {
        &self.field_name_patterns
    }

    /// Collection entity bound to a request field, if any.
    pub fn entity_for_field(&self, field_name: &str) -> Option<&str> {
        self.field_name_patterns
            .iter()
            .find(|p| p.field.name == field_name)
            .map(|p| p.entity_name.as_str())
    }

    pub fn has_request_object_method(&self) -> bool {
        self.request_object_method
    }

    pub fn sample_code_init_fields(&self) -> &[String] {
        &self.sample_code_init_fields
    }
}

/// The interface a method config resolves against.
///
/// An explicit reroute target that does not exist is fatal.
pub fn get_target_interface<'m>(
    model: &'m Model,
    default_interface: &'m Interface,
    reroute_to_grpc_interface: &str,
) -> Result<&'m Interface, ResolveError> {
    if reroute_to_grpc_interface.is_empty() {
        return Ok(default_interface);
    }
    model
        .lookup_interface(reroute_to_grpc_interface)
        .ok_or_else(|| ResolveError::RerouteTargetNotFound(reroute_to_grpc_interface.to_string()))
}

/// Field lookups against one method's input and output messages.
struct FieldResolver<'a, 'd> {
    diags: &'d mut DiagCollector,
    model: &'a Model,
    method: &'a Method,
}

impl FieldResolver<'_, '_> {
    fn message(&mut self, type_name: &str) -> Option<MessageType> {
        let message = self.model.lookup_message(type_name).cloned();
        if message.is_none() {
            self.diags.error_in(&self.method.full_name, format!(
                "message type not found: {} (in method {})",
                type_name, self.method.full_name
            ));
        }
        message
    }

    fn field(&mut self, type_name: &str, field_name: &str, role: &str) -> Option<Field> {
        if field_name.is_empty() {
            self.diags.error_in(&self.method.full_name, format!(
                "missing {} (in method {})",
                role, self.method.full_name
            ));
            return None;
        }
        let message = self.message(type_name)?;
        let field = message.lookup_field(field_name).cloned();
        if field.is_none() {
            self.diags.error_in(&self.method.full_name, format!(
                "{} field not found: {}.{} (in method {})",
                role, type_name, field_name, self.method.full_name
            ));
        }
        field
    }

    fn input_field(&mut self, field_name: &str, role: &str) -> Option<Field> {
        let input = self.method.input_type.clone();
        self.field(&input, field_name, role)
    }

    fn output_field(&mut self, field_name: &str, role: &str) -> Option<Field> {
        let output = self.method.output_type.clone();
        self.field(&output, field_name, role)
    }
}

/// Resolve one method config against an already-found method.
///
/// Every descriptor is validated so that all problems with the entry are
/// reported; the entry yields `None` if any of them recorded an error.
pub fn create_method_config(
    diags: &mut DiagCollector,
    model: &Model,
    proto: &MethodConfigProto,
    method: &Method,
    rerouted_interface: Option<&str>,
    known: &KnownNames<'_>,
) -> Option<MethodConfig> {
    let errors_before = diags.error_count();

    if !proto.retry_codes_name.is_empty() && !known.retry_codes.contains(proto.retry_codes_name.as_str())
    {
        diags.error_in(&method.full_name, format!(
            "Retry codes config used but not defined: '{}' (in method {})",
            proto.retry_codes_name, method.full_name
        ));
    }
    if !proto.retry_params_name.is_empty()
        && !known.retry_params.contains(proto.retry_params_name.as_str())
    {
        diags.error_in(&method.full_name, format!(
            "Retry parameters config used but not defined: '{}' (in method {})",
            proto.retry_params_name, method.full_name
        ));
    }

    let timeout = match proto.timeout_millis {
        Some(ms) if ms <= 0 => {
            diags.error_in(&method.full_name, format!(
                "Default timeout has invalid value: {} (in method {})",
                ms, method.full_name
            ));
            None
        }
        Some(ms) => Some(Duration::from_millis(ms as u64)),
        None => None,
    };

    let mut fields = FieldResolver {
        diags,
        model,
        method,
    };

    let page_streaming = proto
        .page_streaming
        .as_ref()
        .and_then(|p| create_page_streaming(&mut fields, p));
    let grpc_streaming = create_grpc_streaming(&mut fields, proto.grpc_streaming.as_ref());
    let long_running = proto
        .long_running
        .as_ref()
        .and_then(|lr| create_long_running(&mut fields, lr));

    let required_fields: Vec<Field> = proto
        .required_fields
        .iter()
        .filter_map(|name| fields.input_field(name, "required"))
        .collect();
    let optional_fields: Vec<Field> = proto
        .optional_fields
        .iter()
        .filter_map(|name| fields.input_field(name, "optional"))
        .collect();

    let flattening: Vec<FlatteningConfig> = proto
        .flattening
        .iter()
        .flat_map(|f| &f.groups)
        .map(|group| FlatteningConfig {
            parameters: group
                .parameters
                .iter()
                .filter_map(|name| fields.input_field(name, "flattening parameter"))
                .collect(),
        })
        .collect();

    let mut field_name_patterns = Vec::new();
    for (field_name, entity) in &proto.field_name_patterns {
        let field = fields.input_field(field_name, "field name pattern");
        if !known.collections.contains(entity.as_str()) {
            fields.diags.error_in(&method.full_name, format!(
                "Collection not found for entity name: {} (in method {})",
                entity, method.full_name
            ));
            continue;
        }
        if let Some(field) = field {
            field_name_patterns.push(FieldNamePattern {
                field,
                entity_name: entity.clone(),
            });
        }
    }

    if fields.diags.error_count() > errors_before {
        tracing::debug!(method = %method.full_name, "method config rejected");
        return None;
    }

    Some(MethodConfig {
        method: method.clone(),
        rerouted_interface: rerouted_interface.map(str::to_string),
        retry_codes_name: proto.retry_codes_name.clone(),
        retry_settings_name: proto.retry_params_name.clone(),
        timeout,
        page_streaming,
        grpc_streaming,
        long_running,
        flattening,
        required_fields,
        optional_fields,
        field_name_patterns,
        request_object_method: proto.request_object_method,
        sample_code_init_fields: proto.sample_code_init_fields.clone(),
    })
}

fn create_page_streaming(
    fields: &mut FieldResolver<'_, '_>,
    proto: &PageStreamingConfigProto,
) -> Option<PageStreamingConfig> {
    if fields.method.response_streaming() {
        fields.diags.error_in(&fields.method.full_name, format!(
            "page streaming is not supported on server or bidi streaming method {}",
            fields.method.full_name
        ));
        return None;
    }

    let request_token_field = fields.input_field(&proto.request.token_field, "request token");
    let page_size_field = if proto.request.page_size_field.is_empty() {
        None
    } else {
        fields.input_field(&proto.request.page_size_field, "page size")
    };
    let response_token_field = fields.output_field(&proto.response.token_field, "response token");
    let resources_field = fields.output_field(&proto.response.resources_field, "resources");

    // Maps are not pageable resource lists.
    if let Some(resources) = resources_field.as_ref().filter(|f| !f.is_repeated() || f.is_map()) {
        fields.diags.error_in(&fields.method.full_name, format!(
            "resources field must be repeated: {} (in method {})",
            resources.name, fields.method.full_name
        ));
        return None;
    }

    Some(PageStreamingConfig {
        request_token_field: request_token_field?,
        page_size_field,
        response_token_field: response_token_field?,
        resources_field: resources_field?,
    })
}

fn create_grpc_streaming(
    fields: &mut FieldResolver<'_, '_>,
    proto: Option<&GrpcStreamingConfigProto>,
) -> Option<GrpcStreamingConfig> {
    let Some(streaming_type) = GrpcStreamingType::from_streaming(fields.method.streaming()) else {
        if proto.is_some() {
            fields.diags.error_in(&fields.method.full_name, format!(
                "grpc_streaming configured for non-streaming method {}",
                fields.method.full_name
            ));
        }
        return None;
    };

    let resources_field = match proto.map(|p| p.resources_field.as_str()) {
        Some(name) if !name.is_empty() => Some(fields.output_field(name, "streaming resources")?),
        _ => None,
    };
    Some(GrpcStreamingConfig {
        streaming_type,
        resources_field,
    })
}

fn create_long_running(
    fields: &mut FieldResolver<'_, '_>,
    proto: &LongRunningConfigProto,
) -> Option<LongRunningConfig> {
    let method_name = fields.method.full_name.clone();
    let mut ok = true;

    if !fields.method.returns_operation() {
        fields.diags.error_in(&method_name, format!(
            "long_running configured but method does not return {}: {}",
            apigen_model::OPERATION_TYPE,
            method_name
        ));
        ok = false;
    }

    let mut lookup_message = |type_name: &str, role: &str| -> Option<TypeRef> {
        match fields.model.lookup_type(type_name) {
            Some(t) if t.is_message() => Some(t),
            _ => {
                fields.diags.error_in(&method_name, format!(
                    "Type not found for long running {} type: '{}' (in method {})",
                    role, type_name, method_name
                ));
                None
            }
        }
    };
    let return_type = lookup_message(&proto.return_type, "return");
    let metadata_type = lookup_message(&proto.metadata_type, "metadata");

    let mut check = |cond: bool, message: &str| {
        if !cond {
            fields
                .diags
                .error_in(&method_name, format!("{message} (in method {method_name})"));
            ok = false;
        }
    };
    check(
        proto.initial_poll_delay_millis >= 0
            && proto.max_poll_delay_millis >= 0
            && proto.total_poll_timeout_millis >= 0,
        "Poll delays and timeouts must not be negative",
    );
    check(
        proto.poll_delay_multiplier >= 1.0,
        "Multiplier for poll delay must be greater than or equal to 1.0",
    );
    check(
        proto.max_poll_delay_millis >= proto.initial_poll_delay_millis,
        "Initial poll delay must be less than or equal to max poll delay",
    );
    check(
        proto.total_poll_timeout_millis >= proto.max_poll_delay_millis,
        "Total poll timeout must be greater than or equal to max poll delay",
    );

    if !ok {
        return None;
    }
    Some(LongRunningConfig {
        return_type: return_type?,
        metadata_type: metadata_type?,
        implements_delete: proto.implements_delete,
        implements_cancel: proto.implements_cancel,
        initial_poll_delay: Duration::from_millis(proto.initial_poll_delay_millis as u64),
        poll_delay_multiplier: proto.poll_delay_multiplier,
        max_poll_delay: Duration::from_millis(proto.max_poll_delay_millis as u64),
        total_poll_timeout: Duration::from_millis(proto.total_poll_timeout_millis as u64),
    })
}

/// Resolve every method config of the interface, keyed by method simple name.
///
/// Entries that fail are reported and left out; siblings keep resolving.
/// Only a missing reroute target stops the pass.
pub fn create_method_config_map(
    diags: &mut DiagCollector,
    model: &Model,
    iface: &Interface,
    proto: &InterfaceConfigProto,
    known: &KnownNames<'_>,
) -> Result<IndexMap<String, MethodConfig>, ResolveError> {
    let mut map = IndexMap::new();
    for method_proto in &proto.methods {
        let target = get_target_interface(model, iface, &method_proto.reroute_to_grpc_interface)?;
        let Some(method) = target.lookup_method(&method_proto.name) else {
            diags.error_in(
                &iface.full_name,
                format!("method not found: {}", method_proto.name),
            );
            continue;
        };
        let rerouted = (!method_proto.reroute_to_grpc_interface.is_empty())
            .then_some(target.full_name.as_str());
        let Some(config) = create_method_config(diags, model, method_proto, method, rerouted, known)
        else {
            continue;
        };
        if map.contains_key(&method_proto.name) {
            diags.error_in(
                &iface.full_name,
                format!("duplicate method config: {}", method_proto.name),
            );
            continue;
        }
        map.insert(method_proto.name.clone(), config);
    }
    Ok(map)
}

/// Method configs in declaration order; failed entries are absent.
pub fn create_method_configs(
    map: &IndexMap<String, MethodConfig>,
    proto: &InterfaceConfigProto,
) -> Vec<MethodConfig> {
    let mut seen = HashSet::new();
    proto
        .methods
        .iter()
        .filter(|m| seen.insert(m.name.as_str()))
        .filter_map(|m| map.get(&m.name).cloned())
        .collect()
}
