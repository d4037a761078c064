//! Ruby namer.
//!
//! Packages are `::`-separated modules (`Google::Cloud::Library::V1`), method
//! names follow the snake-casing used by the gRPC Ruby runtime, and docs are
//! YARD (`@param`, `@raise`) over RDoc markup.

use crate::calling_form::CallingForm;
use crate::comment::{CommentReformatter, RubyCommentReformatter};
use crate::context::MethodContext;
use crate::formatter::{NameFormatter, RubyNameFormatter};
use crate::name::{Name, to_snake_case};
use crate::traits::{
    RANDOM_TOKEN, SurfaceNamer, Synchronicity, Visibility, substitute_placeholders,
};
use crate::type_name::TypeName;
use crate::types::{RubyTypeFormatter, TypeFormatter};
use apigen_config::{CollectionConfig, GrpcStreamingType, InterfaceConfig, MethodConfig};
use apigen_model::{Field, Interface, Method, TypeRef};

const LONGRUNNING_PACKAGE: &str = "Google::Longrunning";

#[derive(Debug, Clone)]
pub struct RubyNamer {
    package_name: String,
}

impl RubyNamer {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
        }
    }

    fn paged_resource_type_name(&self, method_config: &MethodConfig) -> Option<String> {
        method_config.page_streaming().map(|paging| {
            self.type_formatter()
                .full_name_for_element_type(&paging.resources_field.type_ref)
        })
    }
}

/// Element spelling accepted as a parameter: messages may also be passed as
/// plain hashes.
fn param_element_name(formatter: &dyn TypeFormatter, type_ref: &TypeRef) -> TypeName {
    let name = formatter.full_name_for_element_type(type_ref);
    if type_ref.is_message() {
        TypeName::new(format!("{name} | Hash"))
    } else {
        TypeName::new(name)
    }
}

impl SurfaceNamer for RubyNamer {
    fn language(&self) -> &'static str {
        "ruby"
    }

    fn file_extension(&self) -> &'static str {
        "rb"
    }

    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn name_formatter(&self) -> &dyn NameFormatter {
        &RubyNameFormatter
    }

    fn type_formatter(&self) -> &dyn TypeFormatter {
        &RubyTypeFormatter
    }

    fn comment_reformatter(&self) -> &dyn CommentReformatter {
        &RubyCommentReformatter
    }

    fn clone_with_package_name(&self, package_name: &str) -> Box<dyn SurfaceNamer> {
        Box::new(RubyNamer::new(package_name))
    }

    fn module_separator(&self) -> &'static str {
        "::"
    }

    fn fully_qualified_credentials_class_name(&self) -> String {
        if self.package_name == LONGRUNNING_PACKAGE {
            return "Google::Auth::Credentials".to_string();
        }
        format!("{}::Credentials", self.package_name)
    }

    fn mock_credentials_class_name(&self, iface: &Interface) -> String {
        format!(
            "Mock{}Credentials_{}",
            iface.simple_name(),
            self.api_wrapper_module_version().to_lowercase()
        )
    }

    fn api_wrapper_variable_name(&self, interface_config: &InterfaceConfig) -> String {
        let reduced = self.reduced_service_name(interface_config.simple_name());
        self.local_var_name(&reduced.join("client"))
    }

    fn api_snippets_class_name(&self, interface_config: &InterfaceConfig) -> String {
        self.public_class_name(&Name::upper_camel(&[
            interface_config.simple_name(),
            "ClientSnippets",
        ]))
    }

    /// Without a version module there is nothing to alias above it.
    fn top_level_aliased_api_class_name(
        &self,
        interface_config: &InterfaceConfig,
        package_has_multiple_services: bool,
    ) -> String {
        if !self.has_major_version() {
            return self
                .version_aliased_api_class_name(interface_config, package_has_multiple_services);
        }
        if package_has_multiple_services {
            format!(
                "{}::{}",
                self.top_level_namespace(),
                self.package_service_name(interface_config)
            )
        } else {
            self.top_level_namespace()
        }
    }

    fn proto_file_import_name(&self, filename: &str) -> String {
        filename.replace(".proto", "_pb")
    }

    fn service_file_import_name(&self, filename: &str) -> String {
        filename.replace(".proto", "_services_pb")
    }

    fn grpc_client_type_name(&self, iface: &Interface) -> String {
        self.type_formatter().full_name_for_interface(iface)
    }

    fn grpc_stub_call_string(&self, iface: &Interface, _method: &Method) -> String {
        self.fully_qualified_stub_type(iface)
    }

    /// Matches the method naming of the gRPC Ruby service DSL.
    fn api_method_name(&self, method: &Method, _visibility: Visibility) -> String {
        to_snake_case(&method.simple_name)
    }

    fn lro_api_method_name(&self, method: &Method, _visibility: Visibility) -> String {
        self.method_key(method)
    }

    fn request_variable_name(&self, method: &Method) -> String {
        if method.request_streaming() {
            "reqs".to_string()
        } else {
            "req".to_string()
        }
    }

    fn format_function_name(&self, collection: &CollectionConfig) -> String {
        self.static_function_name(&Name::from(collection.entity_name()).join("path"))
    }

    fn parse_function_name(&self, var: &str, collection: &CollectionConfig) -> String {
        self.static_function_name(
            &Name::from_lower(&["match", var, "from"])
                .join(collection.entity_name())
                .join("name"),
        )
    }

    fn param_type_name(&self, type_ref: &TypeRef) -> String {
        let formatter = self.type_formatter();
        if let (Some(key), Some(value)) = (type_ref.map_key_type(), type_ref.map_value_type()) {
            return TypeName::with_pattern(
                "Hash",
                "Hash",
                "%s{%i => %i}",
                vec![
                    TypeName::new(formatter.full_name_for_element_type(key)),
                    param_element_name(formatter, value),
                ],
            )
            .full_name();
        }
        let element = param_element_name(formatter, type_ref);
        if type_ref.is_repeated() {
            TypeName::with_pattern("Array", "Array", "%s<%i>", vec![element]).full_name()
        } else {
            element.full_name()
        }
    }

    fn message_property_type_name(&self, field: &Field) -> String {
        self.type_formatter().full_name_for(&field.type_ref)
    }

    fn dynamic_lang_return_type_name(&self, context: &MethodContext<'_>) -> String {
        let method = context.method();
        if method.is_output_type_empty() {
            return String::new();
        }
        let class_info = self
            .type_formatter()
            .full_name_for_message(&method.output_type);
        if method.response_streaming() {
            return format!("Enumerable<{class_info}>");
        }
        if let Some(resource) = self.paged_resource_type_name(context.method_config()) {
            return format!("Google::Gax::PagedEnumerable<{resource}>");
        }
        if context.is_long_running() {
            return "Google::Gax::Operation".to_string();
        }
        class_info
    }

    fn param_doc_text(&self, param_name: &str, param_type_name: &str, text: &str) -> String {
        format!(
            "@param {} {{{}}} {}",
            param_name,
            param_type_name,
            self.comment_reformatter().reformat(text)
        )
    }

    fn throws_doc_lines(&self, _method_config: &MethodConfig) -> Vec<String> {
        vec!["@raise [Google::Gax::GaxError] if the RPC is aborted.".to_string()]
    }

    fn return_doc_lines(
        &self,
        context: &MethodContext<'_>,
        _synchronicity: Synchronicity,
    ) -> Vec<String> {
        let method = context.method();
        if method.response_streaming() {
            let class_info = self
                .type_formatter()
                .full_name_for_message(&method.output_type);
            return vec![format!("An enumerable of {class_info} instances."), String::new()];
        }
        if let Some(resource) = self.paged_resource_type_name(context.method_config()) {
            return vec![
                format!("An enumerable of {resource} instances."),
                "See Google::Gax::PagedEnumerable documentation for other".to_string(),
                "operations such as per-page iteration or access to the response".to_string(),
                "object.".to_string(),
            ];
        }
        Vec::new()
    }

    fn sample_response_var_name(&self, context: &MethodContext<'_>, _form: CallingForm) -> String {
        let method_config = context.method_config();
        let streams_out = matches!(
            method_config.grpc_streaming_type(),
            Some(GrpcStreamingType::ServerStreaming | GrpcStreamingType::BidiStreaming)
        );
        if method_config.is_page_streaming() || streams_out {
            "element".to_string()
        } else {
            "response".to_string()
        }
    }

    fn sample_used_var_names(
        &self,
        context: &MethodContext<'_>,
        form: CallingForm,
    ) -> Vec<&'static str> {
        match form {
            CallingForm::Request if context.method().is_output_type_empty() => vec![],
            CallingForm::Request | CallingForm::RequestStreamingClient => vec!["response"],
            CallingForm::RequestPaged => vec!["element", "page"],
            CallingForm::RequestPagedAll
            | CallingForm::RequestStreamingServer
            | CallingForm::RequestStreamingBidi => vec!["element"],
            CallingForm::LongRunningRequestAsync => vec!["op", "response", "metadata"],
        }
    }

    /// `"shelves/$RANDOM"` -> `"shelves/" + Time.new.to_i.to_s`.
    fn inject_random_string_generator_code(&self, random_string: &str) -> String {
        let unquoted = random_string.trim_matches('"');
        let mut parts = Vec::new();
        for (i, literal) in unquoted.split(RANDOM_TOKEN).enumerate() {
            if i > 0 {
                parts.push("Time.new.to_i.to_s".to_string());
            }
            if !literal.is_empty() {
                let literal = literal
                    .replace('\\', "\\\\")
                    .replace('"', "\\\"")
                    .replace("#{", "\\#{");
                parts.push(format!("\"{literal}\""));
            }
        }
        parts.join(" + ")
    }

    /// Ruby interpolates in place: `"%s items"` with `[n]` -> `"#{n} items"`.
    fn interpolated_format_and_args(&self, spec: &str, args: &[String]) -> Vec<String> {
        let spec = spec
            .replace('\\', "\\\\")
            .replace('\t', "\\t")
            .replace('\n', "\\n")
            .replace('"', "\\\"");
        match args {
            [] => vec![spec],
            [only] if spec == "%s" => vec![spec, only.clone()],
            _ => vec![substitute_placeholders(&spec, args, |a| format!("#{{{a}}}"))],
        }
    }

    fn formatted_print_arg_name(
        &self,
        type_ref: &TypeRef,
        variable: &str,
        accessors: &[String],
    ) -> String {
        let mut out = format!("{}{}", variable, accessors.concat());
        if type_ref.is_message() {
            out.push_str(".inspect");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigen_model::PrimitiveType;

    fn namer() -> RubyNamer {
        RubyNamer::new("Google::Cloud::Library::V1")
    }

    fn method(name: &str) -> Method {
        Interface::new("google.example.library.v1.LibraryService")
            .with_method(name, "google.example.library.v1.Req", "google.example.library.v1.Res")
            .methods
            .remove(0)
    }

    #[test]
    fn api_method_names() {
        let n = namer();
        assert_eq!(
            n.api_method_name(&method("ListFooBARBaz"), Visibility::Public),
            "list_foo_bar_baz"
        );
        assert_eq!(n.api_method_name(&method("GetID"), Visibility::Private), "get_id");
        assert_eq!(n.lro_api_method_name(&method("ArchiveBooks"), Visibility::Public), "archive_books");
        assert_eq!(n.sample_function_name(&method("ListBooks")), "sample_list_books");
    }

    #[test]
    fn modules_and_versions() {
        let n = namer();
        assert_eq!(n.api_modules(), vec!["Google", "Cloud", "Library", "V1"]);
        assert_eq!(n.top_level_namespace(), "Google::Cloud::Library");
        assert_eq!(n.api_wrapper_module_version(), "V1");
        assert_eq!(n.module_service_name(), "Library");
        assert_eq!(n.package_file_path(), "google/cloud/library/v1");
        assert_eq!(n.top_level_index_file_import_name(), "google/cloud/library");
        assert_eq!(n.credentials_class_import_name(), "google/cloud/library/v1/credentials");

        let beta = n.clone_with_package_name("Google::Cloud::Speech::V1p1beta1");
        assert_eq!(beta.api_wrapper_module_version(), "V1p1beta1");
        assert_eq!(beta.top_level_namespace(), "Google::Cloud::Speech");

        let unversioned = n.clone_with_package_name("Google::Cloud::Storage");
        assert!(!unversioned.has_major_version());
        assert_eq!(unversioned.api_wrapper_module_version(), "Storage");
    }

    #[test]
    fn credentials() {
        assert_eq!(
            namer().fully_qualified_credentials_class_name(),
            "Google::Cloud::Library::V1::Credentials"
        );
        assert_eq!(
            namer()
                .clone_with_package_name("Google::Longrunning")
                .fully_qualified_credentials_class_name(),
            "Google::Auth::Credentials"
        );
        let iface = Interface::new("google.example.library.v1.LibraryService");
        assert_eq!(
            namer().mock_credentials_class_name(&iface),
            "MockLibraryServiceCredentials_v1"
        );
    }

    #[test]
    fn param_types() {
        let n = namer();
        let book = TypeRef::message("google.example.library.v1.Book");
        assert_eq!(
            n.param_type_name(&book),
            "Google::Example::Library::V1::Book | Hash"
        );
        assert_eq!(
            n.param_type_name(&book.clone().repeated()),
            "Array<Google::Example::Library::V1::Book | Hash>"
        );
        assert_eq!(
            n.param_type_name(&TypeRef::map(TypeRef::primitive(PrimitiveType::String), book)),
            "Hash{String => Google::Example::Library::V1::Book | Hash}"
        );
        assert_eq!(
            n.param_type_name(&TypeRef::primitive(PrimitiveType::Int32).repeated()),
            "Array<Integer>"
        );
    }

    #[test]
    fn sample_text() {
        let n = namer();
        assert_eq!(
            n.inject_random_string_generator_code("\"shelves/$RANDOM\""),
            "\"shelves/\" + Time.new.to_i.to_s"
        );
        assert_eq!(
            n.inject_random_string_generator_code("$RANDOM-$RANDOM"),
            "Time.new.to_i.to_s + \"-\" + Time.new.to_i.to_s"
        );
        assert_eq!(
            n.interpolated_format_and_args("%s has %s books\n", &["shelf".into(), "n".into()]),
            vec!["#{shelf} has #{n} books\\n"]
        );
        assert_eq!(
            n.interpolated_format_and_args("%s", &["shelf".into()]),
            vec!["%s", "shelf"]
        );
        assert_eq!(
            n.interpolated_format_and_args("say \"hi\"", &[]),
            vec!["say \\\"hi\\\""]
        );
        let book = TypeRef::message("google.example.library.v1.Book");
        assert_eq!(
            n.formatted_print_arg_name(&book, "response", &[".shelf".into()]),
            "response.shelf.inspect"
        );
    }

    #[test]
    fn files_and_imports() {
        let n = namer();
        assert_eq!(n.proto_file_name("library.proto"), "library.rb");
        assert_eq!(n.proto_file_import_name("google/example/library.proto"), "google/example/library_pb");
        assert_eq!(
            n.service_file_import_name("google/example/library.proto"),
            "google/example/library_services_pb"
        );
        assert_eq!(n.api_sample_file_name(&["list_books", "RequestPaged"]), "list_books_request_paged.rb");
        assert_eq!(n.source_file_path("lib/google", "LibraryServiceClient"), "lib/google/library_service_client.rb");
    }

    #[test]
    fn random_strings_escape_literal_text() {
        let n = namer();
        assert_eq!(
            n.inject_random_string_generator_code("\"say \"#{x}\" $RANDOM\""),
            "\"say \\\"\\#{x}\\\" \" + Time.new.to_i.to_s"
        );
    }

    #[test]
    fn field_access_is_attribute_style() {
        let n = namer();
        let field = Field::new("shelfName", TypeRef::primitive(PrimitiveType::String));
        assert_eq!(n.field_get_function_name(&field), "shelf_name");
        assert_eq!(n.field_set_function_name(&field), "shelf_name");
        assert_eq!(n.field_accessor_name(&field), ".shelf_name");
    }
}
