//! Python namer.

use crate::comment::{CommentReformatter, IdentityCommentReformatter};
use crate::context::MethodContext;
use crate::formatter::{NameFormatter, PythonNameFormatter};
use crate::traits::{RANDOM_TOKEN, SurfaceNamer, Synchronicity, substitute_placeholders};
use crate::types::{PythonTypeFormatter, TypeFormatter};
use apigen_config::MethodConfig;

#[derive(Debug, Clone)]
pub struct PythonNamer {
    package_name: String,
}

impl PythonNamer {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
        }
    }
}

impl SurfaceNamer for PythonNamer {
    fn language(&self) -> &'static str {
        "python"
    }

    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn name_formatter(&self) -> &dyn NameFormatter {
        &PythonNameFormatter
    }

    fn type_formatter(&self) -> &dyn TypeFormatter {
        &PythonTypeFormatter
    }

    fn comment_reformatter(&self) -> &dyn CommentReformatter {
        &IdentityCommentReformatter
    }

    fn clone_with_package_name(&self, package_name: &str) -> Box<dyn SurfaceNamer> {
        Box::new(PythonNamer::new(package_name))
    }

    fn proto_file_import_name(&self, filename: &str) -> String {
        filename.replace(".proto", "_pb2")
    }

    fn service_file_import_name(&self, filename: &str) -> String {
        filename.replace(".proto", "_pb2_grpc")
    }

    fn dynamic_lang_return_type_name(&self, context: &MethodContext<'_>) -> String {
        let method = context.method();
        if method.is_output_type_empty() {
            return String::new();
        }
        let formatter = self.type_formatter();
        if method.response_streaming() {
            return format!(
                "Iterable[{}]",
                formatter.full_name_for_message(&method.output_type)
            );
        }
        if let Some(paging) = context.method_config().page_streaming() {
            return format!(
                "Iterable[{}]",
                formatter.full_name_for_element_type(&paging.resources_field.type_ref)
            );
        }
        if context.is_long_running() {
            return "google.api_core.operation.Operation".to_string();
        }
        formatter.full_name_for_message(&method.output_type)
    }

    fn param_doc_text(&self, param_name: &str, param_type_name: &str, text: &str) -> String {
        format!(
            "{} ({}): {}",
            param_name,
            param_type_name,
            self.comment_reformatter().reformat(text)
        )
    }

    fn throws_doc_lines(&self, _method_config: &MethodConfig) -> Vec<String> {
        vec![
            "Raises:".to_string(),
            "  google.api_core.exceptions.GoogleAPICallError: If the request failed.".to_string(),
        ]
    }

    fn return_doc_lines(
        &self,
        context: &MethodContext<'_>,
        _synchronicity: Synchronicity,
    ) -> Vec<String> {
        let return_type = self.dynamic_lang_return_type_name(context);
        if return_type.is_empty() {
            return Vec::new();
        }
        vec!["Returns:".to_string(), format!("  {return_type}")]
    }

    fn inject_random_string_generator_code(&self, random_string: &str) -> String {
        let unquoted = random_string.trim_matches(|c| c == '"' || c == '\'');
        let escaped = unquoted.replace('\\', "\\\\").replace('\'', "\\'");
        if !escaped.contains(RANDOM_TOKEN) {
            return format!("'{escaped}'");
        }
        // Literal braces must not open f-string fields.
        let escaped = escaped.replace('{', "{{").replace('}', "}}");
        format!(
            "f'{}'",
            escaped.replace(RANDOM_TOKEN, "{int(time.time())}")
        )
    }

    /// A single f-string: `"%s items"` with `[n]` -> `f"{n} items"`.
    fn interpolated_format_and_args(&self, spec: &str, args: &[String]) -> Vec<String> {
        let spec = spec.replace('\\', "\\\\").replace('"', "\\\"");
        if args.is_empty() {
            return vec![format!("\"{spec}\"")];
        }
        let spec = spec.replace('{', "{{").replace('}', "}}");
        vec![format!(
            "f\"{}\"",
            substitute_placeholders(&spec, args, |a| format!("{{{a}}}"))
        )]
    }
}
