//! Identifier-formatting primitives, one implementation per target language.

use crate::name::{Name, NamePath};

/// Casing and separator rules for one language.
///
/// Each method fixes the *kind* of identifier; the implementation decides how
/// it is spelled.
pub trait NameFormatter: Send + Sync {
    fn public_class_name(&self, name: &Name) -> String;
    fn private_field_name(&self, name: &Name) -> String;
    fn public_field_name(&self, name: &Name) -> String;
    fn local_var_name(&self, name: &Name) -> String;
    fn local_var_reference(&self, name: &Name) -> String;
    fn public_method_name(&self, name: &Name) -> String;
    fn private_method_name(&self, name: &Name) -> String;
    fn static_function_name(&self, name: &Name) -> String;
    fn initted_constant_name(&self, name: &Name) -> String;
    /// Form used to access a map/dictionary entry or a message field by key.
    fn key_name(&self, name: &Name) -> String;
    fn qualified_name(&self, path: &NamePath) -> String;
    /// One directory of a package path.
    fn package_file_path_piece(&self, name: &Name) -> String;
    /// File name (without extension) for a class.
    fn class_file_name_base(&self, name: &Name) -> String;
    /// File name (without extension) for anything that is not a class:
    /// client configs, samples.
    fn file_name_base(&self, name: &Name) -> String;
    /// Method reading the message field `name`.
    fn property_getter_name(&self, name: &Name) -> String;
    fn property_setter_name(&self, name: &Name) -> String;
    /// Expression suffix reading the field from a receiver (`.getX()`, `.x`).
    fn property_accessor(&self, name: &Name) -> String;
}

/// Language-neutral spelling: camel case, dotted qualification.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonNameFormatter;

impl NameFormatter for CommonNameFormatter {
    fn public_class_name(&self, name: &Name) -> String {
        name.to_upper_camel()
    }

    fn private_field_name(&self, name: &Name) -> String {
        name.to_lower_camel()
    }

    fn public_field_name(&self, name: &Name) -> String {
        name.to_lower_camel()
    }

    fn local_var_name(&self, name: &Name) -> String {
        name.to_lower_camel()
    }

    fn local_var_reference(&self, name: &Name) -> String {
        self.local_var_name(name)
    }

    fn public_method_name(&self, name: &Name) -> String {
        name.to_lower_camel()
    }

    fn private_method_name(&self, name: &Name) -> String {
        name.to_lower_camel()
    }

    fn static_function_name(&self, name: &Name) -> String {
        name.to_lower_camel()
    }

    fn initted_constant_name(&self, name: &Name) -> String {
        name.to_upper_underscore()
    }

    fn key_name(&self, name: &Name) -> String {
        name.to_lower_camel()
    }

    fn qualified_name(&self, path: &NamePath) -> String {
        path.to_dotted()
    }

    fn package_file_path_piece(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn class_file_name_base(&self, name: &Name) -> String {
        name.to_upper_camel()
    }

    fn file_name_base(&self, name: &Name) -> String {
        name.to_lower_camel()
    }

    fn property_getter_name(&self, name: &Name) -> String {
        self.public_method_name(&Name::from_lower(&["get"]).join(name.clone()))
    }

    fn property_setter_name(&self, name: &Name) -> String {
        self.public_method_name(&Name::from_lower(&["set"]).join(name.clone()))
    }

    fn property_accessor(&self, name: &Name) -> String {
        format!(".{}()", self.property_getter_name(name))
    }
}

// Keywords and Kernel methods that can't be used bare as local names.
const RUBY_RESERVED: &[&str] = &[
    "__FILE__", "__LINE__", "alias", "and", "begin", "break", "case", "class", "def", "defined?",
    "do", "else", "elsif", "end", "ensure", "false", "for", "if", "in", "module", "next", "nil",
    "not", "or", "redo", "rescue", "retry", "return", "self", "super", "then", "true", "undef",
    "unless", "until", "when", "while", "yield", "print", "puts", "require", "raise", "loop",
];

const PYTHON_RESERVED: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield", "None",
    "True", "False", "id", "type", "filter", "map", "input", "object", "property", "range",
];

fn escape_reserved(identifier: String, reserved: &[&str]) -> String {
    if reserved.contains(&identifier.as_str()) {
        identifier + "_"
    } else {
        identifier
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RubyNameFormatter;

impl NameFormatter for RubyNameFormatter {
    fn public_class_name(&self, name: &Name) -> String {
        name.to_upper_camel()
    }

    fn private_field_name(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn public_field_name(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn local_var_name(&self, name: &Name) -> String {
        escape_reserved(name.to_lower_underscore(), RUBY_RESERVED)
    }

    fn local_var_reference(&self, name: &Name) -> String {
        self.local_var_name(name)
    }

    fn public_method_name(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn private_method_name(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn static_function_name(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn initted_constant_name(&self, name: &Name) -> String {
        name.to_upper_underscore()
    }

    fn key_name(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn qualified_name(&self, path: &NamePath) -> String {
        path.to_double_colon()
    }

    fn package_file_path_piece(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn class_file_name_base(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn file_name_base(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn property_getter_name(&self, name: &Name) -> String {
        self.key_name(name)
    }

    fn property_setter_name(&self, name: &Name) -> String {
        self.key_name(name)
    }

    fn property_accessor(&self, name: &Name) -> String {
        format!(".{}", self.property_getter_name(name))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PythonNameFormatter;

impl NameFormatter for PythonNameFormatter {
    fn public_class_name(&self, name: &Name) -> String {
        name.to_upper_camel()
    }

    fn private_field_name(&self, name: &Name) -> String {
        format!("_{}", name.to_lower_underscore())
    }

    fn public_field_name(&self, name: &Name) -> String {
        escape_reserved(name.to_lower_underscore(), PYTHON_RESERVED)
    }

    fn local_var_name(&self, name: &Name) -> String {
        escape_reserved(name.to_lower_underscore(), PYTHON_RESERVED)
    }

    fn local_var_reference(&self, name: &Name) -> String {
        self.local_var_name(name)
    }

    fn public_method_name(&self, name: &Name) -> String {
        escape_reserved(name.to_lower_underscore(), PYTHON_RESERVED)
    }

    fn private_method_name(&self, name: &Name) -> String {
        format!("_{}", name.to_lower_underscore())
    }

    fn static_function_name(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn initted_constant_name(&self, name: &Name) -> String {
        name.to_upper_underscore()
    }

    fn key_name(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn qualified_name(&self, path: &NamePath) -> String {
        path.to_dotted()
    }

    fn package_file_path_piece(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn class_file_name_base(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn file_name_base(&self, name: &Name) -> String {
        name.to_lower_underscore()
    }

    fn property_getter_name(&self, name: &Name) -> String {
        self.key_name(name)
    }

    fn property_setter_name(&self, name: &Name) -> String {
        self.key_name(name)
    }

    fn property_accessor(&self, name: &Name) -> String {
        format!(".{}", self.property_getter_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruby_escapes_keywords_in_locals_only() {
        let f = RubyNameFormatter;
        assert_eq!(f.local_var_name(&Name::from("end")), "end_");
        assert_eq!(f.public_method_name(&Name::from("end")), "end");
        assert_eq!(
            f.qualified_name(&NamePath::double_colon("Google::Cloud::Speech")),
            "Google::Cloud::Speech"
        );
    }

    #[test]
    fn kinds_differ_per_language() {
        let name = Name::upper_camel(&["ShelfName"]);
        assert_eq!(CommonNameFormatter.local_var_name(&name), "shelfName");
        assert_eq!(RubyNameFormatter.local_var_name(&name), "shelf_name");
        assert_eq!(PythonNameFormatter.private_field_name(&name), "_shelf_name");
        assert_eq!(PythonNameFormatter.local_var_name(&Name::from("type")), "type_");
        assert_eq!(RubyNameFormatter.initted_constant_name(&name), "SHELF_NAME");
    }

    #[test]
    fn file_names_and_properties() {
        let config = Name::upper_camel(&["LibraryService"]).join("client_config");
        assert_eq!(
            CommonNameFormatter.file_name_base(&config),
            "libraryServiceClientConfig"
        );
        assert_eq!(
            RubyNameFormatter.file_name_base(&config),
            "library_service_client_config"
        );
        assert_eq!(
            PythonNameFormatter.file_name_base(&config),
            "library_service_client_config"
        );

        let field = Name::from_lower(&["shelf_name"]);
        assert_eq!(CommonNameFormatter.property_getter_name(&field), "getShelfName");
        assert_eq!(CommonNameFormatter.property_setter_name(&field), "setShelfName");
        assert_eq!(CommonNameFormatter.property_accessor(&field), ".getShelfName()");
        for f in [&RubyNameFormatter as &dyn NameFormatter, &PythonNameFormatter] {
            assert_eq!(f.property_getter_name(&field), "shelf_name");
            assert_eq!(f.property_setter_name(&field), "shelf_name");
            assert_eq!(f.property_accessor(&field), ".shelf_name");
        }
    }
}
