//! Case-neutral identifiers and qualified name paths.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"));
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("valid regex"));

/// Convert any camel, kebab or snake spelling to `lower_snake`.
///
/// `ListFooBARBaz` -> `list_foo_bar_baz`, `GetID` -> `get_id`. Idempotent.
pub fn to_snake_case(identifier: &str) -> String {
    let split = ACRONYM_BOUNDARY.replace_all(identifier, "${1}_${2}");
    let split = CAMEL_BOUNDARY.replace_all(&split, "${1}_${2}");
    split.replace('-', "_").to_lowercase()
}

/// An identifier stored as lowercase words, renderable in any casing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    words: Vec<String>,
}

impl Name {
    /// Build from `lower_underscore` pieces. Only underscores separate words;
    /// case is kept as written.
    pub fn from_lower(pieces: &[&str]) -> Self {
        Self::from_words(pieces.iter().flat_map(|piece| piece.split('_')))
    }

    /// Build from `UpperCamel` (or `lowerCamel`) pieces, splitting at case
    /// boundaries.
    pub fn upper_camel(pieces: &[&str]) -> Self {
        Self::from_words(pieces.iter().flat_map(|piece| {
            to_snake_case(piece)
                .split('_')
                .map(str::to_string)
                .collect::<Vec<_>>()
        }))
    }

    /// Pieces in any spelling at all: camel, snake, kebab, dotted or spaced.
    pub fn any(pieces: &[&str]) -> Self {
        Self::from_words(pieces.iter().flat_map(|piece| {
            to_snake_case(piece)
                .split(['_', ' ', '.'])
                .map(str::to_string)
                .collect::<Vec<_>>()
        }))
    }

    fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        let words = words
            .into_iter()
            .filter(|w| !w.as_ref().is_empty())
            .map(|w| w.as_ref().to_string())
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Append the words of `other`.
    pub fn join(&self, other: impl Into<Name>) -> Name {
        let mut words = self.words.clone();
        words.extend(other.into().words);
        Name { words }
    }

    pub fn to_lower_underscore(&self) -> String {
        self.words.join("_")
    }

    pub fn to_upper_underscore(&self) -> String {
        self.to_lower_underscore().to_uppercase()
    }

    pub fn to_lower_camel(&self) -> String {
        let mut out = String::new();
        for (i, word) in self.words.iter().enumerate() {
            if i == 0 {
                out.push_str(word);
            } else {
                out.push_str(&capitalize(word));
            }
        }
        out
    }

    pub fn to_upper_camel(&self) -> String {
        self.words.iter().map(|w| capitalize(w)).collect()
    }

    pub fn to_separated(&self, separator: &str) -> String {
        self.words.join(separator)
    }
}

impl From<&str> for Name {
    fn from(piece: &str) -> Self {
        Name::any(&[piece])
    }
}

impl From<&String> for Name {
    fn from(piece: &String) -> Self {
        Name::any(&[piece.as_str()])
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A qualified name split into its pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NamePath {
    pieces: Vec<String>,
}

impl NamePath {
    pub fn new(pieces: Vec<String>) -> Self {
        Self { pieces }
    }

    pub fn dotted(name: &str) -> Self {
        Self::split(name, ".")
    }

    pub fn double_colon(name: &str) -> Self {
        Self::split(name, "::")
    }

    fn split(name: &str, separator: &str) -> Self {
        Self {
            pieces: name
                .split(separator)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn pieces(&self) -> &[String] {
        &self.pieces
    }

    pub fn head(&self) -> Option<&str> {
        self.pieces.last().map(String::as_str)
    }

    /// Replace the last piece.
    pub fn with_head(&self, head: &str) -> Self {
        let mut pieces = self.pieces.clone();
        pieces.pop();
        pieces.push(head.to_string());
        Self { pieces }
    }

    pub fn append(&self, piece: &str) -> Self {
        let mut pieces = self.pieces.clone();
        pieces.push(piece.to_string());
        Self { pieces }
    }

    pub fn to_dotted(&self) -> String {
        self.join(".")
    }

    pub fn to_double_colon(&self) -> String {
        self.join("::")
    }

    pub fn join(&self, separator: &str) -> String {
        self.pieces.join(separator)
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_examples() {
        assert_eq!(to_snake_case("ListFooBARBaz"), "list_foo_bar_baz");
        assert_eq!(to_snake_case("GetID"), "get_id");
        assert_eq!(to_snake_case("get-shelf"), "get_shelf");
        assert_eq!(to_snake_case("HTTPRequest2Go"), "http_request2_go");
        assert_eq!(to_snake_case("V1beta2"), "v1beta2");
    }

    #[test]
    fn snake_case_is_idempotent() {
        for input in [
            "ListFooBARBaz",
            "GetID",
            "already_snake",
            "XMLHttpRequest",
            "a-b-C",
            "ABC",
            "v1p1beta1",
        ] {
            let once = to_snake_case(input);
            assert_eq!(to_snake_case(&once), once, "input: {input}");
        }
    }

    #[test]
    fn casings() {
        let name = Name::upper_camel(&["LibraryService"]).join("client_config");
        assert_eq!(name.to_lower_underscore(), "library_service_client_config");
        assert_eq!(name.to_upper_underscore(), "LIBRARY_SERVICE_CLIENT_CONFIG");
        assert_eq!(name.to_lower_camel(), "libraryServiceClientConfig");
        assert_eq!(name.to_upper_camel(), "LibraryServiceClientConfig");
        assert_eq!(name.to_separated("-"), "library-service-client-config");
        assert_eq!(Name::upper_camel(&["GetID"]).to_upper_camel(), "GetId");
    }

    #[test]
    fn constructors_split_differently() {
        assert_eq!(Name::from_lower(&["page_token"]).words(), ["page", "token"]);
        assert_eq!(Name::from_lower(&["pageToken"]).words(), ["pageToken"]);
        assert_eq!(Name::upper_camel(&["PageToken"]).words(), ["page", "token"]);
        assert_eq!(Name::upper_camel(&["google.cloud"]).words(), ["google.cloud"]);
        assert_eq!(
            Name::any(&["google.cloud", "PageToken", "list books"]).words(),
            ["google", "cloud", "page", "token", "list", "books"]
        );
    }

    #[test]
    fn name_paths() {
        let path = NamePath::double_colon("Google::Cloud::Library::V1");
        assert_eq!(path.head(), Some("V1"));
        assert_eq!(path.append("Stub").to_double_colon(), "Google::Cloud::Library::V1::Stub");
        assert_eq!(path.with_head("V2").to_dotted(), "Google.Cloud.Library.V2");
    }
}
