//! The naming contract consumed by the rendering pipeline.

use crate::calling_form::{self, CallingForm};
use crate::comment::CommentReformatter;
use crate::context::MethodContext;
use crate::formatter::NameFormatter;
use crate::name::{Name, NamePath};
use crate::types::TypeFormatter;
use crate::version::is_version;
use apigen_config::{CollectionConfig, InterfaceConfig, MethodConfig};
use apigen_model::{Field, Interface, Method, TypeRef};

/// Placeholder in sample values that generated code replaces with a runtime
/// random string.
pub const RANDOM_TOKEN: &str = "$RANDOM";

/// Error selecting a namer for a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("no namer for language: {0}")]
    UnknownLanguage(String),

    #[error("no package_name configured for language: {0}")]
    MissingPackageName(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synchronicity {
    Sync,
    Async,
}

/// Computes identifiers, paths, type spellings and doc text for one target
/// language and one package.
///
/// Implementations supply the formatters and override only the operations
/// whose shape differs in their language; everything else composes the
/// primitives below. Every operation is a pure function of its arguments and
/// the package name.
pub trait SurfaceNamer: Send + Sync {
    /// Language identifier (e.g., "ruby").
    fn language(&self) -> &'static str;

    /// Source file extension, without the dot.
    fn file_extension(&self) -> &'static str;

    fn package_name(&self) -> &str;

    fn name_formatter(&self) -> &dyn NameFormatter;

    fn type_formatter(&self) -> &dyn TypeFormatter;

    fn comment_reformatter(&self) -> &dyn CommentReformatter;

    /// Same language, different package.
    fn clone_with_package_name(&self, package_name: &str) -> Box<dyn SurfaceNamer>;

    // Identifier primitives.

    fn public_class_name(&self, name: &Name) -> String {
        self.name_formatter().public_class_name(name)
    }

    fn private_field_name(&self, name: &Name) -> String {
        self.name_formatter().private_field_name(name)
    }

    fn public_field_name(&self, name: &Name) -> String {
        self.name_formatter().public_field_name(name)
    }

    fn local_var_name(&self, name: &Name) -> String {
        self.name_formatter().local_var_name(name)
    }

    fn local_var_reference(&self, name: &Name) -> String {
        self.name_formatter().local_var_reference(name)
    }

    fn public_method_name(&self, name: &Name) -> String {
        self.name_formatter().public_method_name(name)
    }

    fn private_method_name(&self, name: &Name) -> String {
        self.name_formatter().private_method_name(name)
    }

    fn static_function_name(&self, name: &Name) -> String {
        self.name_formatter().static_function_name(name)
    }

    fn initted_constant_name(&self, name: &Name) -> String {
        self.name_formatter().initted_constant_name(name)
    }

    fn key_name(&self, name: &Name) -> String {
        self.name_formatter().key_name(name)
    }

    fn qualified_name(&self, path: &NamePath) -> String {
        self.name_formatter().qualified_name(path)
    }

    fn package_file_path_piece(&self, name: &Name) -> String {
        self.name_formatter().package_file_path_piece(name)
    }

    fn class_file_name_base(&self, name: &Name) -> String {
        self.name_formatter().class_file_name_base(name)
    }

    fn file_name_base(&self, name: &Name) -> String {
        self.name_formatter().file_name_base(name)
    }

    // Modules and packaging.

    /// Token separating modules in a qualified name.
    fn module_separator(&self) -> &'static str {
        "."
    }

    /// Split a name qualified with [`Self::module_separator`].
    fn name_path(&self, qualified: &str) -> NamePath {
        NamePath::new(
            qualified
                .split(self.module_separator())
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    fn api_modules(&self) -> Vec<String> {
        self.name_path(self.package_name()).pieces().to_vec()
    }

    /// Package modules above the version module.
    fn top_level_api_modules(&self) -> Vec<String> {
        self.api_modules()
            .into_iter()
            .take_while(|m| !is_version(&Name::from(m).to_lower_underscore()))
            .collect()
    }

    fn top_level_namespace(&self) -> String {
        self.top_level_api_modules().join(self.module_separator())
    }

    fn has_major_version(&self) -> bool {
        self.api_modules()
            .iter()
            .any(|m| is_version(&Name::from(m).to_lower_underscore()))
    }

    /// The version module, or the last module when there is none.
    fn api_wrapper_module_version(&self) -> String {
        let modules = self.api_modules();
        modules
            .iter()
            .find(|m| is_version(&Name::from(*m).to_lower_underscore()))
            .or(modules.last())
            .cloned()
            .unwrap_or_default()
    }

    fn module_service_name(&self) -> String {
        self.top_level_api_modules()
            .pop()
            .unwrap_or_default()
    }

    fn package_file_path(&self) -> String {
        self.api_modules()
            .iter()
            .map(|m| self.package_file_path_piece(&Name::from(m)))
            .collect::<Vec<_>>()
            .join("/")
    }

    fn version_index_file_import_name(&self) -> String {
        self.package_file_path()
    }

    fn top_level_index_file_import_name(&self) -> String {
        self.top_level_api_modules()
            .iter()
            .map(|m| self.package_file_path_piece(&Name::from(m)))
            .collect::<Vec<_>>()
            .join("/")
    }

    fn credentials_class_import_name(&self) -> String {
        let mut paths: Vec<String> = self
            .api_modules()
            .iter()
            .map(|m| self.package_file_path_piece(&Name::from(m)))
            .collect();
        paths.push("credentials".to_string());
        paths.join("/")
    }

    fn fully_qualified_credentials_class_name(&self) -> String {
        format!("{}{}Credentials", self.package_name(), self.module_separator())
    }

    fn mock_credentials_class_name(&self, iface: &Interface) -> String {
        format!("Mock{}Credentials", iface.simple_name())
    }

    // Interface-level names.

    /// Interface simple name without a trailing `Service`.
    fn reduced_service_name(&self, interface_simple_name: &str) -> Name {
        let reduced = interface_simple_name
            .strip_suffix("Service")
            .filter(|r| !r.is_empty())
            .unwrap_or(interface_simple_name);
        Name::upper_camel(&[reduced])
    }

    fn api_wrapper_class_name(&self, interface_config: &InterfaceConfig) -> String {
        self.public_class_name(&Name::upper_camel(&[interface_config.simple_name(), "Client"]))
    }

    fn fully_qualified_api_wrapper_class_name(&self, interface_config: &InterfaceConfig) -> String {
        self.qualified_name(
            &self
                .name_path(self.package_name())
                .append(&self.api_wrapper_class_name(interface_config)),
        )
    }

    fn api_wrapper_variable_name(&self, interface_config: &InterfaceConfig) -> String {
        self.local_var_name(&Name::upper_camel(&[interface_config.simple_name(), "Client"]))
    }

    fn api_snippets_class_name(&self, interface_config: &InterfaceConfig) -> String {
        self.public_class_name(&Name::upper_camel(&[
            interface_config.simple_name(),
            "ApiSnippets",
        ]))
    }

    fn package_service_name(&self, interface_config: &InterfaceConfig) -> String {
        self.public_class_name(&self.reduced_service_name(interface_config.simple_name()))
    }

    fn version_aliased_api_class_name(
        &self,
        interface_config: &InterfaceConfig,
        package_has_multiple_services: bool,
    ) -> String {
        if package_has_multiple_services {
            format!(
                "{}{}{}",
                self.package_name(),
                self.module_separator(),
                self.package_service_name(interface_config)
            )
        } else {
            self.package_name().to_string()
        }
    }

    fn top_level_aliased_api_class_name(
        &self,
        interface_config: &InterfaceConfig,
        package_has_multiple_services: bool,
    ) -> String {
        if package_has_multiple_services {
            format!(
                "{}{}{}",
                self.top_level_namespace(),
                self.module_separator(),
                self.package_service_name(interface_config)
            )
        } else {
            self.top_level_namespace()
        }
    }

    fn client_config_path(&self, interface_config: &InterfaceConfig) -> String {
        let name = Name::upper_camel(&[interface_config.simple_name()]).join("client_config");
        format!("{}.json", self.file_name_base(&name))
    }

    fn service_file_name(&self, interface_config: &InterfaceConfig) -> String {
        let class = self.api_wrapper_class_name(interface_config);
        format!(
            "{}/{}",
            self.package_file_path(),
            self.class_file_name_base(&Name::upper_camel(&[class.as_str()]))
        )
    }

    fn source_file_path(&self, path: &str, public_class_name: &str) -> String {
        format!(
            "{}/{}.{}",
            path,
            self.class_file_name_base(&Name::upper_camel(&[public_class_name])),
            self.file_extension()
        )
    }

    /// `library.proto` -> `library.<ext>`.
    fn proto_file_name(&self, file_simple_name: &str) -> String {
        let stem = file_simple_name
            .strip_suffix("proto")
            .unwrap_or(file_simple_name);
        format!("{}{}", stem, self.file_extension())
    }

    fn proto_file_import_name(&self, filename: &str) -> String {
        filename.replace(".proto", "")
    }

    fn service_file_import_name(&self, filename: &str) -> String {
        filename.replace(".proto", "")
    }

    fn grpc_client_type_name(&self, iface: &Interface) -> String {
        format!("{}Client", self.type_formatter().full_name_for_interface(iface))
    }

    fn fully_qualified_stub_type(&self, iface: &Interface) -> String {
        let path = self.name_path(&self.type_formatter().full_name_for_interface(iface));
        self.qualified_name(&path.append("Stub"))
    }

    fn grpc_stub_call_string(&self, iface: &Interface, method: &Method) -> String {
        format!("/{}/{}", iface.full_name, method.simple_name)
    }

    // Method-level names.

    fn api_method_name(&self, method: &Method, visibility: Visibility) -> String {
        let name = Name::upper_camel(&[method.simple_name.as_str()]);
        match visibility {
            Visibility::Public => self.public_method_name(&name),
            Visibility::Private => self.private_method_name(&name),
        }
    }

    fn lro_api_method_name(&self, method: &Method, visibility: Visibility) -> String {
        self.api_method_name(method, visibility)
    }

    fn method_key(&self, method: &Method) -> String {
        self.key_name(&Name::upper_camel(&[method.simple_name.as_str()]))
    }

    fn sample_function_name(&self, method: &Method) -> String {
        self.private_method_name(
            &Name::from_lower(&["sample"]).join(Name::upper_camel(&[method.simple_name.as_str()])),
        )
    }

    fn request_variable_name(&self, _method: &Method) -> String {
        "request".to_string()
    }

    fn field_get_function_name(&self, field: &Field) -> String {
        self.name_formatter().property_getter_name(&Name::from(&field.name))
    }

    fn field_set_function_name(&self, field: &Field) -> String {
        self.name_formatter().property_setter_name(&Name::from(&field.name))
    }

    fn field_key(&self, field: &Field) -> String {
        self.key_name(&Name::from(&field.name))
    }

    // Resource name helpers.

    fn format_function_name(&self, collection: &CollectionConfig) -> String {
        self.static_function_name(
            &Name::from_lower(&["format"])
                .join(collection.entity_name())
                .join("name"),
        )
    }

    fn parse_function_name(&self, var: &str, collection: &CollectionConfig) -> String {
        self.static_function_name(
            &Name::from_lower(&["parse", var, "from"])
                .join(collection.entity_name())
                .join("name"),
        )
    }

    fn path_template_name(&self, collection: &CollectionConfig) -> String {
        self.initted_constant_name(&Name::from(collection.entity_name()).join("path_template"))
    }

    // Type spellings.

    fn param_type_name(&self, type_ref: &TypeRef) -> String {
        self.type_formatter().full_name_for(type_ref)
    }

    fn message_property_type_name(&self, field: &Field) -> String {
        self.type_formatter().full_name_for(&field.type_ref)
    }

    fn long_running_operation_type_name(&self, type_ref: &TypeRef) -> String {
        self.type_formatter().full_name_for(type_ref)
    }

    /// Return type named in docs for dynamically typed targets; empty when the
    /// method returns nothing.
    fn dynamic_lang_return_type_name(&self, context: &MethodContext<'_>) -> String {
        let method = context.method();
        if method.is_output_type_empty() {
            return String::new();
        }
        self.type_formatter().full_name_for_message(&method.output_type)
    }

    // Doc text.

    fn doc_lines(&self, text: &str) -> Vec<String> {
        self.comment_reformatter()
            .reformat(text)
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn param_doc_text(&self, param_name: &str, _param_type_name: &str, text: &str) -> String {
        format!("{}: {}", param_name, self.comment_reformatter().reformat(text))
    }

    fn throws_doc_lines(&self, _method_config: &MethodConfig) -> Vec<String> {
        Vec::new()
    }

    fn return_doc_lines(
        &self,
        _context: &MethodContext<'_>,
        _synchronicity: Synchronicity,
    ) -> Vec<String> {
        Vec::new()
    }

    // Samples.

    fn calling_forms(&self, context: &MethodContext<'_>) -> Vec<CallingForm> {
        calling_form::calling_forms(context)
    }

    fn default_calling_form(&self, context: &MethodContext<'_>) -> CallingForm {
        calling_form::default_calling_form(context)
    }

    fn sample_response_var_name(&self, _context: &MethodContext<'_>, _form: CallingForm) -> String {
        "response".to_string()
    }

    /// Variable names a sample for `form` declares.
    fn sample_used_var_names(
        &self,
        context: &MethodContext<'_>,
        form: CallingForm,
    ) -> Vec<&'static str> {
        if context.method().is_output_type_empty() && form == CallingForm::Request {
            Vec::new()
        } else {
            vec!["response"]
        }
    }

    fn api_sample_file_name(&self, pieces: &[&str]) -> String {
        format!(
            "{}.{}",
            self.file_name_base(&Name::any(pieces)),
            self.file_extension()
        )
    }

    /// Render a sample string containing [`RANDOM_TOKEN`] as an expression.
    fn inject_random_string_generator_code(&self, random_string: &str) -> String {
        random_string.to_string()
    }

    /// Format string followed by argument expressions, for a printf-style call.
    fn interpolated_format_and_args(&self, spec: &str, args: &[String]) -> Vec<String> {
        std::iter::once(spec.to_string())
            .chain(args.iter().cloned())
            .collect()
    }

    fn formatted_print_arg_name(
        &self,
        _type_ref: &TypeRef,
        variable: &str,
        accessors: &[String],
    ) -> String {
        format!("{}{}", variable, accessors.concat())
    }

    fn index_accessor_name(&self, index: usize) -> String {
        format!("[{index}]")
    }

    fn field_accessor_name(&self, field: &Field) -> String {
        self.name_formatter().property_accessor(&Name::from(&field.name))
    }

    fn map_key_accessor_name(&self, key_type: &TypeRef, key: &str) -> String {
        format!(
            "[{}]",
            self.type_formatter().render_primitive_value(key_type, key)
        )
    }
}

/// Replace each `%s` in `spec` with the next rendered argument; `%%` is a
/// literal percent sign.
pub(crate) fn substitute_placeholders(
    spec: &str,
    args: &[String],
    render: impl Fn(&str) -> String,
) -> String {
    let mut args = args.iter();
    let mut out = String::new();
    let mut chars = spec.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => {
                if let Some(arg) = args.next() {
                    out.push_str(&render(arg));
                }
            }
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}
